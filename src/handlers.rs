use crate::errors::AppError;
use crate::models::{DashboardResponse, FilterQuery, ItemRequest, LimitRequest, Meal, Workout};
use crate::state::{AppState, WebTracker};
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::Local;

/// Largest magnitude accepted for calories and the limit.
pub const MAX_CALORIES: i64 = 1_000_000;

const MISSING_FIELDS: &str = "Please fill in all fields";
const INVALID_CALORIES: &str = "Calories must be a number";
const CALORIES_OUT_OF_RANGE: &str = "Calories must be between -1000000 and 1000000";
const MISSING_LIMIT: &str = "Please enter a calorie limit";
const INVALID_LIMIT: &str = "Calorie limit must be a number";
const LIMIT_OUT_OF_RANGE: &str = "Calorie limit must be between -1000000 and 1000000";

pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<FilterQuery>,
) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(&today_string(), tracker.view(), &filter))
}

pub async fn get_tracker(State(state): State<AppState>) -> Json<DashboardResponse> {
    let tracker = state.tracker.lock().await;
    Json(to_response(&tracker))
}

pub async fn set_limit(
    State(state): State<AppState>,
    Json(payload): Json<LimitRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(apply_limit(&state, &payload).await?))
}

pub async fn add_meal(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(apply_meal(&state, &payload).await?))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(apply_workout(&state, &payload).await?))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.remove_meal(&id)?;
    Ok(Json(to_response(&tracker)))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.remove_workout(&id)?;
    Ok(Json(to_response(&tracker)))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.reset_day()?;
    Ok(Json(to_response(&tracker)))
}

pub async fn set_limit_form(
    State(state): State<AppState>,
    Form(payload): Form<LimitRequest>,
) -> Result<Redirect, AppError> {
    apply_limit(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_meal_form(
    State(state): State<AppState>,
    Form(payload): Form<ItemRequest>,
) -> Result<Redirect, AppError> {
    apply_meal(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_workout_form(
    State(state): State<AppState>,
    Form(payload): Form<ItemRequest>,
) -> Result<Redirect, AppError> {
    apply_workout(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_meal_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.tracker.lock().await.remove_meal(&id)?;
    Ok(Redirect::to("/"))
}

pub async fn delete_workout_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.tracker.lock().await.remove_workout(&id)?;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.tracker.lock().await.reset_day()?;
    Ok(Redirect::to("/"))
}

async fn apply_limit(
    state: &AppState,
    payload: &LimitRequest,
) -> Result<DashboardResponse, AppError> {
    let limit = parse_limit(&payload.limit)?;
    let mut tracker = state.tracker.lock().await;
    tracker.set_limit(limit)?;
    Ok(to_response(&tracker))
}

async fn apply_meal(state: &AppState, payload: &ItemRequest) -> Result<DashboardResponse, AppError> {
    let (name, calories) = parse_item(payload)?;
    let mut tracker = state.tracker.lock().await;
    tracker.add_meal(Meal::new(name, calories))?;
    Ok(to_response(&tracker))
}

async fn apply_workout(
    state: &AppState,
    payload: &ItemRequest,
) -> Result<DashboardResponse, AppError> {
    let (name, calories) = parse_item(payload)?;
    let mut tracker = state.tracker.lock().await;
    tracker.add_workout(Workout::new(name, calories))?;
    Ok(to_response(&tracker))
}

/// Validates a submitted item before anything is constructed. Any finite
/// number is accepted and rounded to whole calories; zero counts as an empty
/// field.
pub fn parse_item(payload: &ItemRequest) -> Result<(String, i64), AppError> {
    let name = payload.name.trim();
    let calories = payload.calories.trim();
    if name.is_empty() || calories.is_empty() {
        return Err(AppError::bad_request(MISSING_FIELDS));
    }

    let calories = parse_calories(calories, INVALID_CALORIES, CALORIES_OUT_OF_RANGE)?;
    if calories == 0.0 {
        return Err(AppError::bad_request(MISSING_FIELDS));
    }
    Ok((name.to_string(), calories.round() as i64))
}

pub fn parse_limit(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::bad_request(MISSING_LIMIT));
    }

    let limit = parse_calories(raw, INVALID_LIMIT, LIMIT_OUT_OF_RANGE)?;
    if limit == 0.0 {
        return Err(AppError::bad_request(MISSING_LIMIT));
    }
    Ok(limit.round() as i64)
}

fn parse_calories(raw: &str, invalid: &str, out_of_range: &str) -> Result<f64, AppError> {
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::bad_request(invalid))?;
    if value.abs().round() > MAX_CALORIES as f64 {
        return Err(AppError::bad_request(out_of_range));
    }
    Ok(value)
}

fn to_response(tracker: &WebTracker) -> DashboardResponse {
    tracker.view().to_response(today_string())
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}

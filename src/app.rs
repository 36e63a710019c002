use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/limit", post(handlers::set_limit_form))
        .route("/meals", post(handlers::add_meal_form))
        .route("/meals/:id/delete", post(handlers::delete_meal_form))
        .route("/workouts", post(handlers::add_workout_form))
        .route("/workouts/:id/delete", post(handlers::delete_workout_form))
        .route("/reset", post(handlers::reset_form))
        .route("/api/tracker", get(handlers::get_tracker))
        .route("/api/limit", post(handlers::set_limit))
        .route("/api/meals", post(handlers::add_meal))
        .route("/api/meals/:id", delete(handlers::delete_meal))
        .route("/api/workouts", post(handlers::add_workout))
        .route("/api/workouts/:id", delete(handlers::delete_workout))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}

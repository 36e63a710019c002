use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_CALORIE_LIMIT: i64 = 2000;

/// Something eaten; adds to the day's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub calories: i64,
}

impl Meal {
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            calories,
        }
    }
}

/// Calories burned; subtracts from the day's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub calories: i64,
}

impl Workout {
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            calories,
        }
    }
}

fn generate_item_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Meal,
    Workout,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Meal => write!(f, "meal"),
            ItemKind::Workout => write!(f, "workout"),
        }
    }
}

/// Borrowed view of either item type, as handed to the render port.
#[derive(Debug, Clone, Copy)]
pub struct ItemRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub calories: i64,
}

impl<'a> From<&'a Meal> for ItemRef<'a> {
    fn from(meal: &'a Meal) -> Self {
        Self {
            id: &meal.id,
            name: &meal.name,
            calories: meal.calories,
        }
    }
}

impl<'a> From<&'a Workout> for ItemRef<'a> {
    fn from(workout: &'a Workout) -> Self {
        Self {
            id: &workout.id,
            name: &workout.name,
            calories: workout.calories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    pub calorie_limit: i64,
    pub total_calories: i64,
    pub meals: Vec<Meal>,
    pub workouts: Vec<Workout>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            calorie_limit: DEFAULT_CALORIE_LIMIT,
            total_calories: 0,
            meals: Vec::new(),
            workouts: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub limit: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub calories: String,
}

/// Numeric fields arrive as text from forms and as either text or numbers
/// from JSON clients; validation happens later on the text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Integer(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Text(value) => value,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub meal_filter: String,
    #[serde(default)]
    pub workout_filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCard {
    pub id: String,
    pub name: String,
    pub calories: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: String,
    pub calorie_limit: i64,
    pub total_calories: i64,
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    pub over_limit: bool,
    pub progress_percent: f64,
    pub meals: Vec<ItemCard>,
    pub workouts: Vec<ItemCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_get_distinct_ids() {
        let first = Meal::new("Eggs", 300);
        let second = Meal::new("Eggs", 300);
        assert_ne!(first.id, second.id);
        assert_eq!(first.id.len(), 32);
    }

    #[test]
    fn meal_json_uses_plain_field_names() {
        let meal = Meal {
            id: "abc".to_string(),
            name: "Toast".to_string(),
            calories: 120,
        };
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "abc", "name": "Toast", "calories": 120 })
        );
    }

    #[test]
    fn default_state_uses_default_limit() {
        let state = TrackerState::default();
        assert_eq!(state.calorie_limit, 2000);
        assert_eq!(state.total_calories, 0);
        assert!(state.meals.is_empty());
        assert!(state.workouts.is_empty());
    }

    #[test]
    fn item_request_accepts_text_or_numbers() {
        let text: ItemRequest =
            serde_json::from_str(r#"{"name":"Eggs","calories":"300"}"#).unwrap();
        let number: ItemRequest =
            serde_json::from_str(r#"{"name":"Eggs","calories":300}"#).unwrap();
        let missing: ItemRequest = serde_json::from_str(r#"{"name":"Eggs"}"#).unwrap();

        assert_eq!(text.calories, "300");
        assert_eq!(number.calories, "300");
        assert_eq!(missing.calories, "");
    }

    #[test]
    fn item_kind_displays_lowercase() {
        assert_eq!(ItemKind::Meal.to_string(), "meal");
        assert_eq!(ItemKind::Workout.to_string(), "workout");
    }
}

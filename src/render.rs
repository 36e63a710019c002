use crate::models::{DashboardResponse, ItemCard, ItemKind, ItemRef};

/// Display surface the tracker pushes updates into.
pub trait RenderPort {
    fn render_limit(&mut self, limit: i64);
    fn render_total(&mut self, total: i64);
    fn render_consumed(&mut self, consumed: i64);
    fn render_burned(&mut self, burned: i64);
    fn render_remaining(&mut self, remaining: i64, over_limit: bool);
    fn render_progress(&mut self, percent: f64);
    fn render_new_item(&mut self, kind: ItemKind, item: ItemRef<'_>);
    fn remove_rendered_item(&mut self, id: &str);
}

/// What the page currently shows. Holds only values pushed through
/// [`RenderPort`]; it never reads tracker state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
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

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_response(&self, date: String) -> DashboardResponse {
        DashboardResponse {
            date,
            calorie_limit: self.calorie_limit,
            total_calories: self.total_calories,
            consumed: self.consumed,
            burned: self.burned,
            remaining: self.remaining,
            over_limit: self.over_limit,
            progress_percent: self.progress_percent,
            meals: self.meals.clone(),
            workouts: self.workouts.clone(),
        }
    }
}

impl RenderPort for Dashboard {
    fn render_limit(&mut self, limit: i64) {
        self.calorie_limit = limit;
    }

    fn render_total(&mut self, total: i64) {
        self.total_calories = total;
    }

    fn render_consumed(&mut self, consumed: i64) {
        self.consumed = consumed;
    }

    fn render_burned(&mut self, burned: i64) {
        self.burned = burned;
    }

    fn render_remaining(&mut self, remaining: i64, over_limit: bool) {
        self.remaining = remaining;
        self.over_limit = over_limit;
    }

    fn render_progress(&mut self, percent: f64) {
        self.progress_percent = percent;
    }

    fn render_new_item(&mut self, kind: ItemKind, item: ItemRef<'_>) {
        let card = ItemCard {
            id: item.id.to_string(),
            name: item.name.to_string(),
            calories: item.calories,
        };
        match kind {
            ItemKind::Meal => self.meals.push(card),
            ItemKind::Workout => self.workouts.push(card),
        }
    }

    fn remove_rendered_item(&mut self, id: &str) {
        self.meals.retain(|card| card.id != id);
        self.workouts.retain(|card| card.id != id);
    }
}

/// Case-insensitive substring match used by the item filters.
pub fn matches_filter(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, Workout};

    #[test]
    fn new_items_land_in_their_own_column() {
        let mut dashboard = Dashboard::new();
        let meal = Meal::new("Eggs", 300);
        let workout = Workout::new("Run", 500);
        dashboard.render_new_item(ItemKind::Meal, (&meal).into());
        dashboard.render_new_item(ItemKind::Workout, (&workout).into());

        assert_eq!(dashboard.meals.len(), 1);
        assert_eq!(dashboard.meals[0].name, "Eggs");
        assert_eq!(dashboard.workouts.len(), 1);
        assert_eq!(dashboard.workouts[0].calories, 500);
    }

    #[test]
    fn remove_drops_only_matching_card() {
        let mut dashboard = Dashboard::new();
        let keep = Meal::new("Soup", 200);
        let cake = Meal::new("Cake", 450);
        dashboard.render_new_item(ItemKind::Meal, (&keep).into());
        dashboard.render_new_item(ItemKind::Meal, (&cake).into());

        dashboard.remove_rendered_item(&cake.id);
        dashboard.remove_rendered_item("unknown");

        assert_eq!(dashboard.meals.len(), 1);
        assert_eq!(dashboard.meals[0].id, keep.id);
    }

    #[test]
    fn response_mirrors_rendered_values() {
        let mut dashboard = Dashboard::new();
        dashboard.render_limit(100);
        dashboard.render_total(150);
        dashboard.render_remaining(-50, true);
        dashboard.render_progress(100.0);

        let response = dashboard.to_response("2026-01-05".to_string());
        assert_eq!(response.date, "2026-01-05");
        assert_eq!(response.calorie_limit, 100);
        assert_eq!(response.remaining, -50);
        assert!(response.over_limit);
        assert_eq!(response.progress_percent, 100.0);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        assert!(matches_filter("Scrambled Eggs", "eggs"));
        assert!(matches_filter("Scrambled Eggs", "BLED"));
        assert!(!matches_filter("Scrambled Eggs", "toast"));
        assert!(matches_filter("Anything", ""));
        assert!(matches_filter("Scrambled Eggs", "d e"));
        assert!(!matches_filter("Eggs", "egg "));
        assert!(!matches_filter("Eggs", " egg"));
    }
}

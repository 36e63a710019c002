use crate::errors::StorageError;
use crate::models::{ItemKind, Meal, TrackerState, Workout};
use crate::render::RenderPort;
use crate::stats::{build_stats, saturating_sum};
use crate::storage::{KeyValueStore, Storage};
use tracing::{info, warn};

/// Owns the day's state. Every mutation updates memory first, then the
/// store, then the render port; a storage failure is returned only after the
/// display has caught up with memory.
#[derive(Debug)]
pub struct Tracker<S, R> {
    state: TrackerState,
    storage: Storage<S>,
    view: R,
}

impl<S: KeyValueStore, R: RenderPort> Tracker<S, R> {
    /// Restores state from storage and renders the initial stats. Item cards
    /// are not rendered until [`Tracker::load_items`] is called.
    pub fn new(storage: Storage<S>, view: R) -> Self {
        let meals = storage.meals();
        let workouts = storage.workouts();
        let total_calories = net_calories(&meals, &workouts);

        let stored_total = storage.total_calories();
        if stored_total != total_calories {
            warn!(
                "stored total {stored_total} disagrees with logged items, using {total_calories}"
            );
        }

        let mut tracker = Self {
            state: TrackerState {
                calorie_limit: storage.calorie_limit(),
                total_calories,
                meals,
                workouts,
            },
            storage,
            view,
        };
        tracker.view.render_limit(tracker.state.calorie_limit);
        tracker.render_stats();
        tracker
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn view(&self) -> &R {
        &self.view
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn set_limit(&mut self, limit: i64) -> Result<(), StorageError> {
        self.state.calorie_limit = limit;
        let persisted = self.storage.set_calorie_limit(limit);
        info!("calorie limit set to {limit}");

        self.view.render_limit(limit);
        self.render_stats();
        persisted
    }

    pub fn add_meal(&mut self, meal: Meal) -> Result<(), StorageError> {
        if self.state.meals.iter().any(|existing| existing.id == meal.id) {
            warn!("ignoring meal with duplicate id {}", meal.id);
            return Ok(());
        }

        self.state.total_calories = self.state.total_calories.saturating_add(meal.calories);
        self.state.meals.push(meal);
        let persisted = self.persist_meals();

        if let Some(meal) = self.state.meals.last() {
            info!("added meal {:?} ({} kcal)", meal.name, meal.calories);
            self.view.render_new_item(ItemKind::Meal, meal.into());
        }
        self.render_stats();
        persisted
    }

    pub fn add_workout(&mut self, workout: Workout) -> Result<(), StorageError> {
        if self.state.workouts.iter().any(|existing| existing.id == workout.id) {
            warn!("ignoring workout with duplicate id {}", workout.id);
            return Ok(());
        }

        self.state.total_calories = self.state.total_calories.saturating_sub(workout.calories);
        self.state.workouts.push(workout);
        let persisted = self.persist_workouts();

        if let Some(workout) = self.state.workouts.last() {
            info!("added workout {:?} ({} kcal)", workout.name, workout.calories);
            self.view.render_new_item(ItemKind::Workout, workout.into());
        }
        self.render_stats();
        persisted
    }

    /// Returns `Ok(false)` without touching anything when `id` is unknown.
    pub fn remove_meal(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(index) = self.state.meals.iter().position(|meal| meal.id == id) else {
            return Ok(false);
        };

        let meal = self.state.meals.remove(index);
        self.state.total_calories = self.state.total_calories.saturating_sub(meal.calories);
        let persisted = self.persist_meals();
        info!("removed meal {:?}", meal.name);

        self.view.remove_rendered_item(&meal.id);
        self.render_stats();
        persisted.map(|()| true)
    }

    /// Returns `Ok(false)` without touching anything when `id` is unknown.
    pub fn remove_workout(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(index) = self.state.workouts.iter().position(|workout| workout.id == id) else {
            return Ok(false);
        };

        let workout = self.state.workouts.remove(index);
        self.state.total_calories = self.state.total_calories.saturating_add(workout.calories);
        let persisted = self.persist_workouts();
        info!("removed workout {:?}", workout.name);

        self.view.remove_rendered_item(&workout.id);
        self.render_stats();
        persisted.map(|()| true)
    }

    /// Clears totals and both lists. The limit is kept and written back after
    /// the store is cleared so a reload shows the same limit.
    pub fn reset_day(&mut self) -> Result<(), StorageError> {
        let removed_ids: Vec<String> = self
            .state
            .meals
            .drain(..)
            .map(|meal| meal.id)
            .chain(self.state.workouts.drain(..).map(|workout| workout.id))
            .collect();
        self.state.total_calories = 0;

        let limit = self.state.calorie_limit;
        let persisted = self
            .storage
            .clear_all()
            .and_then(|()| self.storage.set_calorie_limit(limit));
        info!("day reset, {} items cleared", removed_ids.len());

        for id in &removed_ids {
            self.view.remove_rendered_item(id);
        }
        self.render_stats();
        persisted
    }

    /// Replays every logged item into the render port. Nothing is persisted
    /// or re-aggregated.
    pub fn load_items(&mut self) {
        for meal in &self.state.meals {
            self.view.render_new_item(ItemKind::Meal, meal.into());
        }
        for workout in &self.state.workouts {
            self.view.render_new_item(ItemKind::Workout, workout.into());
        }
    }

    fn persist_meals(&mut self) -> Result<(), StorageError> {
        self.storage.set_meals(&self.state.meals)?;
        self.storage.set_total_calories(self.state.total_calories)
    }

    fn persist_workouts(&mut self) -> Result<(), StorageError> {
        self.storage.set_workouts(&self.state.workouts)?;
        self.storage.set_total_calories(self.state.total_calories)
    }

    fn render_stats(&mut self) {
        let stats = build_stats(&self.state);
        self.view.render_total(self.state.total_calories);
        self.view.render_consumed(stats.consumed);
        self.view.render_burned(stats.burned);
        self.view.render_remaining(stats.remaining, stats.over_limit);
        self.view.render_progress(stats.progress_percent);
    }
}

fn net_calories(meals: &[Meal], workouts: &[Workout]) -> i64 {
    let consumed = saturating_sum(meals.iter().map(|meal| meal.calories));
    let burned = saturating_sum(workouts.iter().map(|workout| workout.calories));
    consumed.saturating_sub(burned)
}

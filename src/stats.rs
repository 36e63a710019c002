use crate::models::TrackerState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieStats {
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    pub progress_percent: f64,
    pub over_limit: bool,
}

/// Derived display values. Always recomputed from the full state.
pub fn build_stats(state: &TrackerState) -> CalorieStats {
    let consumed = saturating_sum(state.meals.iter().map(|meal| meal.calories));
    let burned = saturating_sum(state.workouts.iter().map(|workout| workout.calories));
    let remaining = state.calorie_limit.saturating_sub(state.total_calories);

    CalorieStats {
        consumed,
        burned,
        remaining,
        progress_percent: progress_percent(state.total_calories, state.calorie_limit),
        over_limit: remaining <= 0,
    }
}

pub fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0i64, |acc, value| acc.saturating_add(value))
}

pub fn progress_percent(total: i64, limit: i64) -> f64 {
    if limit <= 0 {
        return if total > 0 { 100.0 } else { 0.0 };
    }
    let percent = total as f64 * 100.0 / limit as f64;
    percent.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, Workout};

    fn state(limit: i64, meals: &[i64], workouts: &[i64]) -> TrackerState {
        let meals: Vec<Meal> = meals.iter().map(|c| Meal::new("meal", *c)).collect();
        let workouts: Vec<Workout> = workouts.iter().map(|c| Workout::new("workout", *c)).collect();
        let total = meals.iter().map(|m| m.calories).sum::<i64>()
            - workouts.iter().map(|w| w.calories).sum::<i64>();
        TrackerState {
            calorie_limit: limit,
            total_calories: total,
            meals,
            workouts,
        }
    }

    #[test]
    fn single_meal_under_limit() {
        let stats = build_stats(&state(2000, &[300], &[]));
        assert_eq!(stats.consumed, 300);
        assert_eq!(stats.burned, 0);
        assert_eq!(stats.remaining, 1700);
        assert_eq!(stats.progress_percent, 15.0);
        assert!(!stats.over_limit);
    }

    #[test]
    fn workout_only_clamps_progress_at_zero() {
        let stats = build_stats(&state(2000, &[], &[500]));
        assert_eq!(stats.burned, 500);
        assert_eq!(stats.remaining, 2200);
        assert_eq!(stats.progress_percent, 0.0);
        assert!(!stats.over_limit);
    }

    #[test]
    fn over_limit_clamps_progress_at_hundred() {
        let stats = build_stats(&state(100, &[150], &[]));
        assert_eq!(stats.remaining, -50);
        assert_eq!(stats.progress_percent, 100.0);
        assert!(stats.over_limit);
    }

    #[test]
    fn exactly_at_limit_is_over_limit() {
        let stats = build_stats(&state(500, &[600], &[100]));
        assert_eq!(stats.remaining, 0);
        assert_eq!(stats.progress_percent, 100.0);
        assert!(stats.over_limit);
    }

    #[test]
    fn one_below_limit_is_not_over() {
        let stats = build_stats(&state(500, &[499], &[]));
        assert_eq!(stats.remaining, 1);
        assert!(!stats.over_limit);
    }

    #[test]
    fn extreme_values_saturate() {
        let state = TrackerState {
            calorie_limit: 2000,
            total_calories: -i64::MAX,
            meals: vec![Meal::new("a", i64::MAX), Meal::new("b", i64::MAX)],
            workouts: vec![Workout::new("Run", i64::MAX)],
        };
        let stats = build_stats(&state);
        assert_eq!(stats.consumed, i64::MAX);
        assert_eq!(stats.burned, i64::MAX);
        assert_eq!(stats.remaining, i64::MAX);
        assert!(!stats.over_limit);
        assert_eq!(stats.progress_percent, 0.0);
    }

    #[test]
    fn progress_stays_in_range() {
        let cases = [
            (-5000, 10),
            (0, 2000),
            (1, 3),
            (9999, 1),
            (50, 0),
            (-50, 0),
            (i64::MAX, 1),
            (i64::MIN, -1),
        ];
        for (total, limit) in cases {
            let percent = progress_percent(total, limit);
            assert!((0.0..=100.0).contains(&percent), "{total}/{limit} -> {percent}");
        }
    }
}

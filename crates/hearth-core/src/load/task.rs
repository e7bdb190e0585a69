//! Task cognitive-load heuristic.

/// Score a task's cognitive load on an absolute 0..=1 scale.
///
/// priority weight + category weight + description-length bonus, capped at
/// 1.0. Unrecognized or missing priorities score as `medium`; unrecognized
/// or missing categories score the `family` weight.
pub fn calculate_task_cognitive_load(
    priority: Option<&str>,
    category: Option<&str>,
    description: Option<&str>,
) -> f64 {
    let priority_weight = match priority {
        Some("low") => 0.1,
        Some("medium") => 0.2,
        Some("high") => 0.3,
        _ => 0.2,
    };

    let category_weight = match category {
        Some("admin") => 0.3,
        Some("health") => 0.25,
        Some("school") => 0.25,
        Some("family") => 0.15,
        Some("home") => 0.1,
        _ => 0.15,
    };

    let description_bonus = match description.map(|d| d.chars().count()).unwrap_or(0) {
        len if len > 200 => 0.2,
        len if len > 100 => 0.1,
        _ => 0.0,
    };

    (priority_weight + category_weight + description_bonus).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_home_short_description() {
        let load = calculate_task_cognitive_load(Some("low"), Some("home"), Some("Water plants"));
        assert!((load - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_medium_family() {
        let load =
            calculate_task_cognitive_load(Some("medium"), Some("family"), Some("Plan family dinner"));
        assert!((load - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_category_uses_default_weight() {
        let load = calculate_task_cognitive_load(Some("medium"), None, None);
        assert!((load - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_long_description_high_admin_stays_in_range() {
        let description = "x".repeat(300);
        let load = calculate_task_cognitive_load(Some("high"), Some("admin"), Some(&description));
        assert!(load > 0.0);
        assert!(load <= 1.0);
        assert!((load - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_description_length_thresholds() {
        let base = calculate_task_cognitive_load(Some("low"), Some("home"), None);
        let at_100 =
            calculate_task_cognitive_load(Some("low"), Some("home"), Some(&"x".repeat(100)));
        let over_100 =
            calculate_task_cognitive_load(Some("low"), Some("home"), Some(&"x".repeat(101)));
        let over_200 =
            calculate_task_cognitive_load(Some("low"), Some("home"), Some(&"x".repeat(201)));

        assert!((at_100 - base).abs() < f64::EPSILON);
        assert!((over_100 - (base + 0.1)).abs() < f64::EPSILON);
        assert!((over_200 - (base + 0.2)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unrecognized_values_use_defaults() {
        let load = calculate_task_cognitive_load(Some("urgent!!"), Some("misc"), None);
        assert!((load - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_output_always_in_unit_interval() {
        for priority in [None, Some("low"), Some("medium"), Some("high"), Some("??")] {
            for category in [None, Some("admin"), Some("health"), Some("??")] {
                for len in [0usize, 50, 150, 250] {
                    let description = "d".repeat(len);
                    let load =
                        calculate_task_cognitive_load(priority, category, Some(&description));
                    assert!((0.0..=1.0).contains(&load));
                }
            }
        }
    }
}

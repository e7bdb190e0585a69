//! Static role lookup tables consulted during event sync.
//!
//! Role names arrive as free strings from the scheduling UI. Unrecognized
//! names get weight 3 and category `unknown`; both defaults are contract.

/// Cognitive-load weight of a named event role (1 = light, 5 = heavy).
pub fn role_weight(role_name: &str) -> i64 {
    match role_name {
        "meal_planner" => 5,
        "appointment_scheduler" => 5,
        "logistics_coordinator" => 4,
        "gift_coordinator" => 4,
        "school_liaison" => 4,
        "driver" => 2,
        "chaperone" => 2,
        "snack_provider" => 1,
        "equipment_manager" => 2,
        "emotional_support" => 4,
        "homework_monitor" => 3,
        "bedtime_lead" => 3,
        _ => 3,
    }
}

/// Category of a named event role.
pub fn role_category(role_name: &str) -> &'static str {
    match role_name {
        "meal_planner" | "snack_provider" => "meals",
        "appointment_scheduler" | "school_liaison" => "admin",
        "logistics_coordinator" | "driver" | "equipment_manager" => "logistics",
        "gift_coordinator" => "social",
        "chaperone" | "emotional_support" | "bedtime_lead" => "care",
        "homework_monitor" => "school",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles() {
        assert_eq!(role_weight("meal_planner"), 5);
        assert_eq!(role_category("meal_planner"), "meals");
        assert_eq!(role_weight("driver"), 2);
        assert_eq!(role_category("driver"), "logistics");
    }

    #[test]
    fn test_unrecognized_role_defaults() {
        assert_eq!(role_weight("interpretive_dance_lead"), 3);
        assert_eq!(role_category("interpretive_dance_lead"), "unknown");
    }
}

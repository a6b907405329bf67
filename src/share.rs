//! Text handed to the share/clipboard button and the HUD labels

use crate::sim::{FoodKind, WinSummary};

/// Message shared after a win
pub fn share_text(summary: &WinSummary) -> String {
    let c = &summary.counts;
    format!(
        "🕳️ Jelly Hole\n\n\
         I devoured all {} food items and scored {} pts!\n\
         🍔{} burgers  🍕{} pizzas  🍣{} sushi  🍗{} chicken\n\
         Final hole size: {}\n\n\
         Can you beat me? 👊",
        summary.total_items,
        summary.score,
        c[FoodKind::Burger],
        c[FoodKind::Pizza],
        c[FoodKind::Sushi],
        c[FoodKind::Chicken],
        summary.final_size_level
    )
}

/// "N items left" label under the HUD
pub fn remaining_label(left: usize) -> String {
    match left {
        0 => "🎉 All eaten!".to_string(),
        1 => "🍽️ 1 item left".to_string(),
        n => format!("🍽️ {} items left", n),
    }
}

/// Score popup shown where an item went down
pub fn popup_text(value: u32) -> String {
    format!("+{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FoodCounts;

    #[test]
    fn test_share_text_lists_counts() {
        let mut counts = FoodCounts::default();
        counts[FoodKind::Burger] = 9;
        counts[FoodKind::Pizza] = 8;
        counts[FoodKind::Sushi] = 7;
        counts[FoodKind::Chicken] = 6;
        let summary = WinSummary {
            total_items: 30,
            score: 43,
            counts,
            final_size_level: 5,
        };
        let text = share_text(&summary);
        assert!(text.starts_with("🕳️ Jelly Hole\n\n"));
        assert!(text.contains("I devoured all 30 food items and scored 43 pts!"));
        assert!(text.contains("🍔9 burgers  🍕8 pizzas  🍣7 sushi  🍗6 chicken"));
        assert!(text.contains("Final hole size: 5"));
        assert!(text.ends_with("Can you beat me? 👊"));
    }

    #[test]
    fn test_remaining_label_plurals() {
        assert_eq!(remaining_label(30), "🍽️ 30 items left");
        assert_eq!(remaining_label(1), "🍽️ 1 item left");
        assert_eq!(remaining_label(0), "🎉 All eaten!");
    }

    #[test]
    fn test_summary_json_field_names() {
        let summary = WinSummary {
            total_items: 30,
            score: 42,
            counts: FoodCounts::default(),
            final_size_level: 5,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_items"], 30);
        assert_eq!(json["final_size_level"], 5);
        assert_eq!(json["counts"], serde_json::json!([0, 0, 0, 0]));
        assert_eq!(popup_text(2), "+2");
    }
}

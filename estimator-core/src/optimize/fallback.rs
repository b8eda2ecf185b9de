use uuid::Uuid;

use crate::estimate::CostBreakdown;

use super::{Complexity, Impact, Suggestion, SuggestionCategory};

/// Fixed ordered list of generic suggestions used when the AI path fails or
/// returns nothing usable. Savings are recomputed from the live breakdown on
/// every call, never cached from a previous run.
pub fn fallback_suggestions(breakdown: &CostBreakdown) -> Vec<Suggestion> {
    let make = |category, title: &str, description: &str, savings: f64, complexity, time, quality| {
        Suggestion {
            id: Uuid::new_v4(),
            category,
            title: title.to_string(),
            description: description.to_string(),
            potential_savings: savings,
            implementation_complexity: complexity,
            time_impact: time,
            quality_impact: quality,
        }
    };

    vec![
        make(
            SuggestionCategory::Procurement,
            "Consolidate bulk material procurement",
            "Negotiate a single-supplier contract for bulk materials to unlock \
             volume discounts and reduce delivery overhead.",
            breakdown.materials.total * 0.05,
            Complexity::Low,
            Impact::None,
            Impact::None,
        ),
        make(
            SuggestionCategory::Scheduling,
            "Compress the labor schedule",
            "Resequence trades to run in parallel where possible, shortening \
             total crew engagement days.",
            breakdown.labor.total * 0.08,
            Complexity::Medium,
            Impact::Minimal,
            Impact::None,
        ),
        make(
            SuggestionCategory::Materials,
            "Evaluate alternative material grades",
            "Mid-tier material grades frequently meet the same functional \
             requirements as premium selections at a lower unit cost.",
            breakdown.materials.total * 0.06,
            Complexity::Low,
            Impact::None,
            Impact::Minimal,
        ),
        make(
            SuggestionCategory::Other,
            "Pool equipment rentals",
            "Rent equipment per work phase rather than carrying it for the \
             full project duration.",
            breakdown.overhead.total * 0.10,
            Complexity::Low,
            Impact::Minimal,
            Impact::None,
        ),
        make(
            SuggestionCategory::Design,
            "Run a design simplification review",
            "A value-engineering pass over non-structural detailing commonly \
             trims a few percent from the overall estimate.",
            breakdown.total * 0.04,
            Complexity::Medium,
            Impact::Minimal,
            Impact::Minimal,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PricingCatalog;
    use crate::estimate::{
        compute_breakdown, ConstructionType, Currency, LaborSelections, MaterialSelections,
        OverheadSelections, ProjectParams, TypeQuantity,
    };

    fn breakdown_with_materials() -> CostBreakdown {
        let project = ProjectParams {
            name: "Fallback Test".to_string(),
            location: "Pune".to_string(),
            currency: Currency::Inr,
            area: 900.0,
            construction_type: ConstructionType::Residential,
            floors: 1,
        };
        let materials = MaterialSelections {
            sand: Some(TypeQuantity {
                kind: "River Sand".to_string(),
                quantity: 10.0,
            }),
            ..Default::default()
        };
        compute_breakdown(
            &project,
            &materials,
            &LaborSelections::default(),
            &OverheadSelections::default(),
            &PricingCatalog::new(),
        )
    }

    #[test]
    fn test_exactly_five_suggestions() {
        let breakdown = breakdown_with_materials();
        let suggestions = fallback_suggestions(&breakdown);
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions.iter().all(|s| s.potential_savings >= 0.0));
    }

    #[test]
    fn test_savings_track_live_breakdown() {
        let breakdown = breakdown_with_materials();
        let suggestions = fallback_suggestions(&breakdown);
        // materials total = 25000 + 2% misc = 25500; 5% = 1275
        assert!((suggestions[0].potential_savings - breakdown.materials.total * 0.05).abs() < 1e-9);
        assert!((suggestions[4].potential_savings - breakdown.total * 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_fresh_ids_each_run() {
        let breakdown = breakdown_with_materials();
        let first = fallback_suggestions(&breakdown);
        let second = fallback_suggestions(&breakdown);
        assert_ne!(first[0].id, second[0].id);
    }
}

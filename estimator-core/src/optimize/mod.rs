pub mod rules;
pub mod fallback;

pub use fallback::fallback_suggestions;
pub use rules::generate_suggestions;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optimized totals never drop below this fraction of the original estimate,
/// a guard against suggestion savings stacking.
pub const SAVINGS_FLOOR: f64 = 0.6;

pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Materials,
    Labor,
    Design,
    Scheduling,
    Procurement,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    None,
    Minimal,
    Moderate,
    Significant,
}

/// A single optimization recommendation. Generated fresh each run and never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub potential_savings: f64,
    pub implementation_complexity: Complexity,
    pub time_impact: Impact,
    pub quality_impact: Impact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub suggestions: Vec<Suggestion>,
    /// Sum over the retained suggestions only, not all candidates.
    pub potential_savings: f64,
    pub optimized_total: f64,
}

impl OptimizationResult {
    /// Rank candidates by savings, keep the top five, and derive the
    /// optimized total with the 60% floor applied.
    pub fn assemble(breakdown_total: f64, mut candidates: Vec<Suggestion>) -> Self {
        candidates.sort_by(|a, b| {
            b.potential_savings
                .partial_cmp(&a.potential_savings)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(MAX_SUGGESTIONS);

        let potential_savings: f64 = candidates.iter().map(|s| s.potential_savings).sum();
        let optimized_total =
            (breakdown_total - potential_savings).max(breakdown_total * SAVINGS_FLOOR);

        Self {
            suggestions: candidates,
            potential_savings,
            optimized_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(savings: f64) -> Suggestion {
        Suggestion {
            id: Uuid::new_v4(),
            category: SuggestionCategory::Other,
            title: "t".to_string(),
            description: "d".to_string(),
            potential_savings: savings,
            implementation_complexity: Complexity::Low,
            time_impact: Impact::None,
            quality_impact: Impact::None,
        }
    }

    #[test]
    fn test_sorted_descending_and_capped_at_five() {
        let candidates = vec![
            suggestion(100.0),
            suggestion(700.0),
            suggestion(300.0),
            suggestion(900.0),
            suggestion(500.0),
            suggestion(200.0),
            suggestion(800.0),
        ];
        let result = OptimizationResult::assemble(1_000_000.0, candidates);
        assert_eq!(result.suggestions.len(), 5);
        let savings: Vec<f64> = result
            .suggestions
            .iter()
            .map(|s| s.potential_savings)
            .collect();
        assert_eq!(savings, vec![900.0, 800.0, 700.0, 500.0, 300.0]);
        assert_eq!(result.potential_savings, 3200.0);
    }

    #[test]
    fn test_optimized_total_clamps_at_sixty_percent() {
        // Scenario D: 500k of savings against a 1M total clamps to 600k
        let result =
            OptimizationResult::assemble(1_000_000.0, vec![suggestion(300_000.0), suggestion(200_000.0)]);
        assert_eq!(result.potential_savings, 500_000.0);
        assert_eq!(result.optimized_total, 600_000.0);
    }

    #[test]
    fn test_optimized_total_without_clamp() {
        let result = OptimizationResult::assemble(1_000_000.0, vec![suggestion(100_000.0)]);
        assert_eq!(result.optimized_total, 900_000.0);
    }

    #[test]
    fn test_empty_candidates() {
        let result = OptimizationResult::assemble(250_000.0, vec![]);
        assert!(result.suggestions.is_empty());
        assert_eq!(result.potential_savings, 0.0);
        assert_eq!(result.optimized_total, 250_000.0);
    }
}

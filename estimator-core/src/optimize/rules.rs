use uuid::Uuid;

use crate::estimate::{CostBreakdown, LaborSelections, MaterialSelections, OverheadSelections};

use super::{Complexity, Impact, Suggestion, SuggestionCategory, MAX_SUGGESTIONS};

/// Scheduled days above which a role is flagged for prefabrication or
/// schedule compression.
pub const SCHEDULE_DAY_THRESHOLD: f64 = 30.0;

fn suggestion(
    category: SuggestionCategory,
    title: &str,
    description: String,
    potential_savings: f64,
    implementation_complexity: Complexity,
    time_impact: Impact,
    quality_impact: Impact,
) -> Suggestion {
    Suggestion {
        id: Uuid::new_v4(),
        category,
        title: title.to_string(),
        description,
        potential_savings,
        implementation_complexity,
        time_impact,
        quality_impact,
    }
}

/// Deterministic analysis of a computed breakdown plus the original
/// selections. Each rule is an independent predicate and savings formula;
/// rules do not interact. Returns at most five suggestions, sorted by
/// potential savings descending.
pub fn generate_suggestions(
    breakdown: &CostBreakdown,
    materials: &MaterialSelections,
    labor: &LaborSelections,
    overhead: &OverheadSelections,
) -> Vec<Suggestion> {
    let mut candidates = Vec::new();

    // Premium cement grade downgrade
    let cement_cost = breakdown.materials.get("cement");
    if let Some(cement) = &materials.cement {
        if cement.kind == "OPC 53 Grade" && cement_cost > 0.0 {
            candidates.push(suggestion(
                SuggestionCategory::Materials,
                "Switch to OPC 43 Grade cement",
                "OPC 43 Grade meets strength requirements for most non-structural \
                 work at a lower unit price than OPC 53 Grade."
                    .to_string(),
                cement_cost * 0.18,
                Complexity::Low,
                Impact::None,
                Impact::Minimal,
            ));
        }
    }

    // Cheaper brick alternative
    let bricks_cost = breakdown.materials.get("bricks");
    if let Some(bricks) = &materials.bricks {
        if bricks.kind == "Red Clay Bricks" && bricks_cost > 0.0 {
            candidates.push(suggestion(
                SuggestionCategory::Materials,
                "Use fly ash bricks instead of red clay",
                "Fly ash bricks offer comparable compressive strength with better \
                 uniformity and a lower per-piece cost."
                    .to_string(),
                bricks_cost * 0.15,
                Complexity::Low,
                Impact::None,
                Impact::None,
            ));
        }
    }

    // Steel outweighing cement hints at an over-engineered structure
    let steel_cost = breakdown.materials.get("steel");
    if steel_cost > cement_cost && steel_cost > 0.0 {
        candidates.push(suggestion(
            SuggestionCategory::Design,
            "Review structural reinforcement design",
            "Steel spend exceeds cement spend; a structural review of bar \
             spacing and member sizing often recovers over-provisioned tonnage."
                .to_string(),
            steel_cost * 0.12,
            Complexity::Medium,
            Impact::Minimal,
            Impact::None,
        ));
    }

    // Long-running crews: prefabrication / schedule compression
    let crews = [
        ("masons", &labor.masons),
        ("carpenters", &labor.carpenters),
        ("painters", &labor.painters),
        ("electricians", &labor.electricians),
        ("plumbers", &labor.plumbers),
        ("helpers", &labor.helpers),
    ];
    for (role, sel) in crews {
        if let Some(crew) = sel {
            let role_cost = breakdown.labor.get(role);
            if crew.days > SCHEDULE_DAY_THRESHOLD && role_cost > 0.0 {
                candidates.push(suggestion(
                    SuggestionCategory::Scheduling,
                    "Compress the work schedule with prefabrication",
                    format!(
                        "The {} crew is scheduled for {} days; prefabricated \
                         elements and parallel work sequencing shorten long crew engagements.",
                        role, crew.days
                    ),
                    role_cost * 0.22,
                    Complexity::Medium,
                    Impact::Minimal,
                    Impact::Minimal,
                ));
            }
        }
    }

    // Helper-heavy crew ratio
    let helper_count = labor.helpers.as_ref().map_or(0, |c| c.count);
    let skilled_count = labor.masons.as_ref().map_or(0, |c| c.count)
        + labor.carpenters.as_ref().map_or(0, |c| c.count);
    let helper_cost = breakdown.labor.get("helpers");
    if helper_count > skilled_count && helper_cost > 0.0 {
        candidates.push(suggestion(
            SuggestionCategory::Labor,
            "Rebalance the helper-to-skilled ratio",
            format!(
                "{} helpers against {} masons and carpenters; trimming the \
                 helper pool to match skilled throughput removes idle day rates.",
                helper_count, skilled_count
            ),
            helper_cost * 0.15,
            Complexity::Low,
            Impact::None,
            Impact::None,
        ));
    }

    // Consolidated bulk procurement across the heavy materials
    let bulk_cost = breakdown.materials.get("sand")
        + breakdown.materials.get("cement")
        + breakdown.materials.get("aggregate");
    if bulk_cost > 0.0 {
        candidates.push(suggestion(
            SuggestionCategory::Procurement,
            "Consolidate bulk material orders",
            "Sand, cement and aggregate ordered together from one supplier \
             qualify for volume pricing and shared delivery runs."
                .to_string(),
            bulk_cost * 0.08,
            Complexity::Low,
            Impact::None,
            Impact::None,
        ));
    }

    // High-cost equipment tier: rent or share instead
    let equipment_cost = breakdown.overhead.get("equipment");
    if let Some(equipment) = &overhead.equipment {
        if equipment.kind == "Heavy Machinery" && equipment_cost > 0.0 {
            candidates.push(suggestion(
                SuggestionCategory::Procurement,
                "Rent or share heavy machinery",
                "Heavy machinery billed for the full project duration can be \
                 rented per phase or shared with adjacent sites."
                    .to_string(),
                equipment_cost * 0.22,
                Complexity::Low,
                Impact::Minimal,
                Impact::None,
            ));
        }
    }

    // Most complex permit tier: process streamlining
    let permit_cost = breakdown.overhead.get("permits");
    if let Some(permits) = &overhead.permits {
        if permits.secondary == "Complex" && permit_cost > 0.0 {
            candidates.push(suggestion(
                SuggestionCategory::Other,
                "Streamline the permit process",
                "Complex-tier permits often bundle approvals that can be filed \
                 in parallel or pre-cleared, reducing fees and resubmissions."
                    .to_string(),
                permit_cost * 0.10,
                Complexity::Medium,
                Impact::Moderate,
                Impact::None,
            ));
        }
    }

    candidates.sort_by(|a, b| {
        b.potential_savings
            .partial_cmp(&a.potential_savings)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

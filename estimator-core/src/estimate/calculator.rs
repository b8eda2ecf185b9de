use crate::catalog::PricingCatalog;

use super::{
    CostBreakdown, GroupBreakdown, LaborSelections, MaterialSelections, OverheadSelections,
    ProjectParams, TypeQuantity,
};

/// Miscellaneous materials allowance, as a fraction of the materials subtotal.
pub const MISC_RATE: f64 = 0.02;

/// Transportation rate per km per trip; not a catalog lookup.
pub const HAUL_RATE: f64 = 60.0;

/// Map the quantity selections and the pricing catalog into a cost breakdown.
///
/// Pure and deterministic: identical inputs always produce an identical
/// breakdown. Unknown or mismatched selector keys cost exactly 0 instead of
/// erroring; absent category selections emit no line item at all. Line items
/// appear in catalog declaration order.
pub fn compute_breakdown(
    project: &ProjectParams,
    materials: &MaterialSelections,
    labor: &LaborSelections,
    overhead: &OverheadSelections,
    catalog: &PricingCatalog,
) -> CostBreakdown {
    tracing::debug!(project = %project.name, "computing cost breakdown");

    let materials_group = compute_materials(materials, catalog);
    let labor_group = compute_labor(labor, catalog);
    let overhead_group = compute_overhead(overhead, catalog);

    let total = materials_group.total + labor_group.total + overhead_group.total;
    CostBreakdown {
        materials: materials_group,
        labor: labor_group,
        overhead: overhead_group,
        total,
    }
}

fn compute_materials(materials: &MaterialSelections, catalog: &PricingCatalog) -> GroupBreakdown {
    let mut group = GroupBreakdown::default();

    let flat_items: [(&str, &Option<TypeQuantity>); 13] = [
        ("sand", &materials.sand),
        ("cement", &materials.cement),
        ("aggregate", &materials.aggregate),
        ("steel", &materials.steel),
        ("bricks", &materials.bricks),
        ("wood", &materials.wood),
        ("paint", &materials.paint),
        ("fixtures", &materials.fixtures),
        ("windows", &materials.windows),
        ("doors", &materials.doors),
        ("roofing", &materials.roofing),
        ("flooring", &materials.flooring),
        ("glasswork", &materials.glasswork),
    ];

    // sand..paint come before the two-key categories in declaration order
    for (category, sel) in &flat_items[..7] {
        if let Some(s) = sel {
            let unit = catalog.material_price(category, &s.kind).unwrap_or(0.0);
            group.push(category, unit * s.quantity);
        }
    }

    if let Some(s) = &materials.electrical {
        let cost = catalog
            .material_combo_price("electrical", &s.primary, &s.secondary)
            .unwrap_or(0.0);
        group.push("electrical", cost);
    }
    if let Some(s) = &materials.plumbing {
        let cost = catalog
            .material_combo_price("plumbing", &s.primary, &s.secondary)
            .unwrap_or(0.0);
        group.push("plumbing", cost);
    }

    for (category, sel) in &flat_items[7..] {
        if let Some(s) = sel {
            let unit = catalog.material_price(category, &s.kind).unwrap_or(0.0);
            group.push(category, unit * s.quantity);
        }
    }

    // Derived last: 2% of everything above, then folded into the total
    let misc = group.total * MISC_RATE;
    group.push("miscellaneous", misc);

    group
}

fn compute_labor(labor: &LaborSelections, catalog: &PricingCatalog) -> GroupBreakdown {
    let mut group = GroupBreakdown::default();

    let roles = [
        ("masons", &labor.masons),
        ("carpenters", &labor.carpenters),
        ("painters", &labor.painters),
        ("electricians", &labor.electricians),
        ("plumbers", &labor.plumbers),
        ("helpers", &labor.helpers),
    ];

    for (role, sel) in roles {
        if let Some(crew) = sel {
            let rate = catalog.day_rate(role).unwrap_or(0.0);
            group.push(role, rate * f64::from(crew.count) * crew.days);
        }
    }

    group
}

fn compute_overhead(overhead: &OverheadSelections, catalog: &PricingCatalog) -> GroupBreakdown {
    let mut group = GroupBreakdown::default();

    if let Some(s) = &overhead.permits {
        let cost = catalog
            .overhead_combo_price("permits", &s.primary, &s.secondary)
            .unwrap_or(0.0);
        group.push("permits", cost);
    }

    let monthly = [
        ("insurance", &overhead.insurance),
        ("equipment", &overhead.equipment),
        ("utilities", &overhead.utilities),
    ];
    for (category, sel) in monthly {
        if let Some(s) = sel {
            let unit = catalog.overhead_price(category, &s.kind).unwrap_or(0.0);
            group.push(category, unit * s.quantity);
        }
    }

    if let Some(s) = &overhead.site_preparation {
        let rate = catalog
            .overhead_combo_price("site_preparation", &s.primary, &s.secondary)
            .unwrap_or(0.0);
        group.push("site_preparation", rate * s.quantity);
    }

    if let Some(s) = &overhead.transportation {
        group.push("transportation", s.distance_km * s.trips * HAUL_RATE);
    }

    group
}

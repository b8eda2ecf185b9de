use crate::estimate::{CostBreakdown, Currency, GroupBreakdown, ProjectParams};
use crate::optimize::OptimizationResult;

/// Integer-rounded currency rendering with thousands separators; fractional
/// units are never displayed.
pub fn format_currency(currency: Currency, amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}{}", currency.symbol(), grouped)
    } else {
        format!("{}{}", currency.symbol(), grouped)
    }
}

fn push_group(out: &mut String, heading: &str, group: &GroupBreakdown, currency: Currency) {
    out.push_str(&format!("{}\n", heading));
    for item in &group.items {
        out.push_str(&format!(
            "  {:<20} {}\n",
            item.key,
            format_currency(currency, item.amount)
        ));
    }
    out.push_str(&format!(
        "  {:<20} {}\n\n",
        "subtotal",
        format_currency(currency, group.total)
    ));
}

/// Render a fully computed estimate to a downloadable plain-text document.
/// Pure formatting over already-computed data.
pub fn render_report(
    project: &ProjectParams,
    breakdown: &CostBreakdown,
    optimization: Option<&OptimizationResult>,
) -> String {
    let currency = project.currency;
    let mut out = String::new();

    out.push_str("CONSTRUCTION COST ESTIMATE\n");
    out.push_str("==========================\n\n");
    out.push_str(&format!("Project:  {}\n", project.name));
    out.push_str(&format!("Location: {}\n", project.location));
    out.push_str(&format!(
        "Type:     {}, {} floor(s), {:.0} sqft\n\n",
        project.construction_type.label(),
        project.floors,
        project.area
    ));

    push_group(&mut out, "MATERIALS", &breakdown.materials, currency);
    push_group(&mut out, "LABOR", &breakdown.labor, currency);
    push_group(&mut out, "OVERHEAD", &breakdown.overhead, currency);

    out.push_str(&format!(
        "GRAND TOTAL: {}\n",
        format_currency(currency, breakdown.total)
    ));

    if let Some(optimization) = optimization {
        out.push_str("\nOPTIMIZATION SUGGESTIONS\n");
        out.push_str("------------------------\n");
        for (i, s) in optimization.suggestions.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} (saves {})\n   {}\n",
                i + 1,
                s.title,
                format_currency(currency, s.potential_savings),
                s.description
            ));
        }
        out.push_str(&format!(
            "\nPotential savings: {}\nOptimized total:   {}\n",
            format_currency(currency, optimization.potential_savings),
            format_currency(currency, optimization.optimized_total)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PricingCatalog;
    use crate::estimate::{
        compute_breakdown, ConstructionType, CrewSelection, LaborSelections, MaterialSelections,
        OverheadSelections, TypeQuantity,
    };
    use crate::optimize::{generate_suggestions, OptimizationResult};

    #[test]
    fn test_format_currency_integer_rounded() {
        assert_eq!(format_currency(Currency::Inr, 1234567.89), "₹1,234,568");
        assert_eq!(format_currency(Currency::Usd, 0.4), "$0");
        assert_eq!(format_currency(Currency::Usd, 999.5), "$1,000");
        assert_eq!(format_currency(Currency::Eur, -2500.0), "-€2,500");
        assert_eq!(format_currency(Currency::Gbp, 42.0), "£42");
    }

    #[test]
    fn test_report_contains_all_sections() {
        let project = ProjectParams {
            name: "Report Test".to_string(),
            location: "Pune".to_string(),
            currency: Currency::Inr,
            area: 1200.0,
            construction_type: ConstructionType::Residential,
            floors: 2,
        };
        let materials = MaterialSelections {
            sand: Some(TypeQuantity {
                kind: "River Sand".to_string(),
                quantity: 10.0,
            }),
            ..Default::default()
        };
        let labor = LaborSelections {
            masons: Some(CrewSelection {
                count: 5,
                days: 40.0,
            }),
            ..Default::default()
        };
        let catalog = PricingCatalog::new();
        let breakdown = compute_breakdown(
            &project,
            &materials,
            &labor,
            &OverheadSelections::default(),
            &catalog,
        );
        let suggestions =
            generate_suggestions(&breakdown, &materials, &labor, &OverheadSelections::default());
        let optimization = OptimizationResult::assemble(breakdown.total, suggestions);

        let report = render_report(&project, &breakdown, Some(&optimization));
        assert!(report.contains("Report Test"));
        assert!(report.contains("MATERIALS"));
        assert!(report.contains("LABOR"));
        assert!(report.contains("OVERHEAD"));
        assert!(report.contains("GRAND TOTAL"));
        assert!(report.contains("OPTIMIZATION SUGGESTIONS"));
        assert!(report.contains("Optimized total"));
        // No fractional currency units anywhere
        assert!(!report.contains(".5"));
    }

    #[test]
    fn test_report_without_optimization() {
        let project = ProjectParams {
            name: "Bare".to_string(),
            location: "Pune".to_string(),
            currency: Currency::Usd,
            area: 800.0,
            construction_type: ConstructionType::Commercial,
            floors: 1,
        };
        let breakdown = compute_breakdown(
            &project,
            &MaterialSelections::default(),
            &LaborSelections::default(),
            &OverheadSelections::default(),
            &PricingCatalog::new(),
        );
        let report = render_report(&project, &breakdown, None);
        assert!(!report.contains("OPTIMIZATION SUGGESTIONS"));
    }
}

use crate::estimate::{CostBreakdown, GroupBreakdown, ProjectParams};

fn push_group(out: &mut String, heading: &str, group: &GroupBreakdown) {
    out.push_str(&format!("{} (total {:.0}):\n", heading, group.total));
    for item in &group.items {
        out.push_str(&format!("  - {}: {:.0}\n", item.key, item.amount));
    }
}

fn push_project(out: &mut String, project: &ProjectParams) {
    out.push_str(&format!(
        "Project: {} at {}\nConstruction type: {}, area {:.0} sqft, {} floor(s), currency {}\n",
        project.name,
        project.location,
        project.construction_type.label(),
        project.area,
        project.floors,
        project.currency.symbol(),
    ));
}

/// Prompt for the optimization endpoint. The reply is expected as repeated
/// labeled blocks, each introduced by a `SUGGESTION` heading line.
pub fn build_optimization_prompt(project: &ProjectParams, breakdown: &CostBreakdown) -> String {
    let mut out = String::new();
    out.push_str("You are a construction cost consultant. Analyze this estimate and propose up to 5 cost-saving changes.\n\n");
    push_project(&mut out, project);
    out.push('\n');
    push_group(&mut out, "Materials", &breakdown.materials);
    push_group(&mut out, "Labor", &breakdown.labor);
    push_group(&mut out, "Overhead", &breakdown.overhead);
    out.push_str(&format!("Grand total: {:.0}\n\n", breakdown.total));
    out.push_str(
        "Format each proposal exactly as:\n\
         SUGGESTION\n\
         Title: <short title>\n\
         Description: <one or two sentences>\n\
         Category: <materials|labor|design|scheduling|procurement|other>\n\
         Potential Savings: <number>\n\
         Implementation Complexity: <low|medium|high>\n\
         Time Impact: <none|minimal|moderate|significant>\n\
         Quality Impact: <none|minimal|moderate|significant>\n",
    );
    out
}

/// Prompt for the prediction endpoint: one refined total with reasoning,
/// contributing factors and a confidence level.
pub fn build_prediction_prompt(project: &ProjectParams, breakdown: Option<&CostBreakdown>) -> String {
    let mut out = String::new();
    out.push_str("You are a construction cost consultant. Predict a refined total cost for this project.\n\n");
    push_project(&mut out, project);
    if let Some(breakdown) = breakdown {
        out.push('\n');
        push_group(&mut out, "Materials", &breakdown.materials);
        push_group(&mut out, "Labor", &breakdown.labor);
        push_group(&mut out, "Overhead", &breakdown.overhead);
        out.push_str(&format!("Computed total: {:.0}\n", breakdown.total));
    }
    out.push_str(
        "\nReply exactly as:\n\
         Estimated Total: <number>\n\
         Reasoning: <one or two sentences>\n\
         Factors: <comma-separated list>\n\
         Confidence: <low|medium|high>\n",
    );
    out
}

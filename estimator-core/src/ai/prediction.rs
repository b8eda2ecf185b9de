use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::estimate::{CostBreakdown, ProjectParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A refined total estimate from the prediction endpoint, or its
/// deterministic stand-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictedEstimate {
    pub total: f64,
    pub reasoning: String,
    pub factors: Vec<String>,
    pub confidence: Confidence,
}

/// Contingency multiplier applied to a computed breakdown total when the
/// prediction endpoint is unavailable.
const FALLBACK_CONTINGENCY: f64 = 1.05;

/// Deterministic stand-in for the prediction endpoint: breakdown total with
/// a contingency margin when a breakdown exists, otherwise area times the
/// construction-type base rate per floor.
pub fn deterministic_prediction(
    project: &ProjectParams,
    breakdown: Option<&CostBreakdown>,
) -> PredictedEstimate {
    match breakdown {
        Some(breakdown) => PredictedEstimate {
            total: breakdown.total * FALLBACK_CONTINGENCY,
            reasoning: "Computed breakdown total with a 5% contingency margin.".to_string(),
            factors: vec![
                "computed cost breakdown".to_string(),
                "contingency margin".to_string(),
            ],
            confidence: Confidence::Low,
        },
        None => PredictedEstimate {
            total: project.area
                * project.construction_type.base_rate()
                * f64::from(project.floors),
            reasoning: format!(
                "Base rate estimate for {} construction over {} floor(s).",
                project.construction_type.label(),
                project.floors
            ),
            factors: vec![
                "built-up area".to_string(),
                "construction-type base rate".to_string(),
            ],
            confidence: Confidence::Low,
        },
    }
}

/// Decode the labeled prediction reply. A reply without a parsable total is
/// unusable and yields `None`, which routes the caller to the deterministic
/// fallback.
pub fn decode_prediction(text: &str) -> Option<PredictedEstimate> {
    let total_text = capture(total_re(), text)?;
    let digits: String = total_text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let total: f64 = digits.parse().ok()?;

    let reasoning = capture(reasoning_re(), text).unwrap_or_default();
    let factors = capture(factors_re(), text)
        .map(|list| {
            list.split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let confidence = capture(confidence_re(), text)
        .map(|c| {
            let lower = c.to_lowercase();
            if lower.contains("high") {
                Confidence::High
            } else if lower.contains("medium") {
                Confidence::Medium
            } else {
                Confidence::Low
            }
        })
        .unwrap_or(Confidence::Low);

    Some(PredictedEstimate {
        total,
        reasoning: reasoning.to_string(),
        factors,
        confidence,
    })
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("static regex"))
        }
    };
}

cached_regex!(
    total_re,
    r"(?im)^[\s*#>-]*(?:estimated|refined)\s+total[\s*]*:[\s*]*(.+)$"
);
cached_regex!(reasoning_re, r"(?im)^[\s*#>-]*reasoning[\s*]*:[\s*]*(.+)$");
cached_regex!(factors_re, r"(?im)^[\s*#>-]*factors[\s*]*:[\s*]*(.+)$");
cached_regex!(confidence_re, r"(?im)^[\s*#>-]*confidence[\s*]*:[\s*]*(.+)$");

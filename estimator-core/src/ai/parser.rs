use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::optimize::{Complexity, Impact, Suggestion, SuggestionCategory};

/// Best-effort decoding of the free-text optimization reply.
///
/// The reply is expected as repeated labeled blocks separated by `SUGGESTION`
/// heading lines. Every labeled field is extracted independently; a missing
/// field falls back to a default rather than invalidating the block. A block
/// with neither a title nor a description is dropped. This function never
/// panics and never errors; an unusable reply decodes to an empty list.
pub fn decode_suggestions(text: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for block in boundary_re().split(text) {
        if let Some(suggestion) = decode_block(block) {
            suggestions.push(suggestion);
        }
    }

    suggestions
}

fn decode_block(block: &str) -> Option<Suggestion> {
    let title = field(title_re(), block);
    let description = field(description_re(), block);
    if title.is_none() && description.is_none() {
        return None;
    }

    Some(Suggestion {
        id: Uuid::new_v4(),
        category: field(category_re(), block)
            .map(parse_category)
            .unwrap_or(SuggestionCategory::Other),
        title: title
            .unwrap_or("Optimization suggestion")
            .to_string(),
        description: description.unwrap_or_default().to_string(),
        potential_savings: field(savings_re(), block)
            .map(parse_savings)
            .unwrap_or(0.0),
        implementation_complexity: field(complexity_re(), block)
            .map(parse_complexity)
            .unwrap_or(Complexity::Medium),
        time_impact: field(time_impact_re(), block)
            .map(parse_impact)
            .unwrap_or(Impact::Minimal),
        quality_impact: field(quality_impact_re(), block)
            .map(parse_impact)
            .unwrap_or(Impact::Minimal),
    })
}

fn field<'a>(re: &Regex, block: &'a str) -> Option<&'a str> {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Strip everything that is not a digit or decimal point before parsing.
/// Unparsable remainders (including multiple decimal points) are 0.
fn parse_savings(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().unwrap_or(0.0).max(0.0)
}

fn parse_category(text: &str) -> SuggestionCategory {
    let lower = text.to_lowercase();
    if lower.contains("material") {
        SuggestionCategory::Materials
    } else if lower.contains("labor") || lower.contains("labour") {
        SuggestionCategory::Labor
    } else if lower.contains("design") {
        SuggestionCategory::Design
    } else if lower.contains("schedul") {
        SuggestionCategory::Scheduling
    } else if lower.contains("procure") {
        SuggestionCategory::Procurement
    } else {
        SuggestionCategory::Other
    }
}

fn parse_complexity(text: &str) -> Complexity {
    let lower = text.to_lowercase();
    if lower.contains("low") {
        Complexity::Low
    } else if lower.contains("high") {
        Complexity::High
    } else {
        Complexity::Medium
    }
}

fn parse_impact(text: &str) -> Impact {
    let lower = text.to_lowercase();
    if lower.contains("none") {
        Impact::None
    } else if lower.contains("significant") {
        Impact::Significant
    } else if lower.contains("moderate") {
        Impact::Moderate
    } else {
        Impact::Minimal
    }
}

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("static regex"))
        }
    };
}

cached_regex!(boundary_re, r"(?im)^[\s*#>-]*suggestion\b[^\n]*$");
cached_regex!(title_re, r"(?im)^[\s*#>-]*title[\s*]*:[\s*]*(.+)$");
cached_regex!(description_re, r"(?im)^[\s*#>-]*description[\s*]*:[\s*]*(.+)$");
cached_regex!(category_re, r"(?im)^[\s*#>-]*category[\s*]*:[\s*]*(.+)$");
cached_regex!(savings_re, r"(?im)^[\s*#>-]*potential\s+savings[\s*]*:[\s*]*(.+)$");
cached_regex!(
    complexity_re,
    r"(?im)^[\s*#>-]*implementation\s+complexity[\s*]*:[\s*]*(.+)$"
);
cached_regex!(time_impact_re, r"(?im)^[\s*#>-]*time\s+impact[\s*]*:[\s*]*(.+)$");
cached_regex!(
    quality_impact_re,
    r"(?im)^[\s*#>-]*quality\s+impact[\s*]*:[\s*]*(.+)$"
);

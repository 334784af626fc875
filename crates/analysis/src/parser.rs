//! Scrapes suggestions, a quality score and explanatory sections out of the
//! free-text reply returned for an analysis prompt.
//!
//! The reply format is only requested, never guaranteed, so every step has a
//! fallback and none of them fails on a reply that ignores the template.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{AnalysisError, Result};
use crate::schema::{AnalysisDetails, AnalysisResult};

/// Numbered (`1.`), starred or dashed line, captured up to its first period.
static SUGGESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:\d+\.|\*|-)\s*([^.\n]+\.)").unwrap());

static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)summary[:\s]+([^\n]+)").unwrap());

/// The heading line plus every following line up to the next blank one.
static EXPLANATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)detailed explanation[:\s]+([^\n]+(?:\n[^\n]+)*)").unwrap()
});

/// Line prefixes (lowercase) that mark section headings rather than suggestions.
const HEADING_PREFIXES: [&str; 3] = ["summary", "overall", "detailed"];

/// One entry of the score lookup table.
pub struct ScorePattern {
    pub label: &'static str,
    regex: Regex,
    extract: fn(&Captures<'_>) -> Option<f64>,
}

impl ScorePattern {
    fn new(label: &'static str, pattern: &str, extract: fn(&Captures<'_>) -> Option<f64>) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).unwrap(),
            extract,
        }
    }

    /// Run this entry alone against an already-lowercased reply.
    pub fn apply(&self, lowered: &str) -> Option<f64> {
        self.regex
            .captures(lowered)
            .and_then(|caps| (self.extract)(&caps))
    }
}

fn first_group_as_f64(caps: &Captures<'_>) -> Option<f64> {
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Checked in order; the first entry that yields a number wins.
pub static SCORE_PATTERNS: Lazy<Vec<ScorePattern>> = Lazy::new(|| {
    vec![
        ScorePattern::new("score", r"score:\s*(\d*\.?\d+)", first_group_as_f64),
        ScorePattern::new("quality score", r"quality score:\s*(\d*\.?\d+)", first_group_as_f64),
        ScorePattern::new(
            "overall quality score",
            r"overall quality score:\s*(\d*\.?\d+)",
            first_group_as_f64,
        ),
        ScorePattern::new("score of", r"score of\s*(\d*\.?\d+)", first_group_as_f64),
    ]
});

/// Parse a model reply into an [`AnalysisResult`].
pub fn parse_analysis_response(response_text: &str) -> Result<AnalysisResult> {
    let suggestions = extract_suggestions(response_text);
    let score = extract_score(response_text);

    // Anything the regexes let through must still fit in a JSON number.
    if !score.is_finite() {
        return Err(AnalysisError::Parse {
            message: format!("score {} is not a finite number", score),
            raw: response_text.to_string(),
        });
    }

    let summary = extract_summary(response_text);
    let explanation = extract_explanation(response_text);

    Ok(AnalysisResult {
        details: AnalysisDetails {
            explanation,
            raw_analysis: response_text.to_string(),
            suggestions_count: suggestions.len(),
            summary,
        },
        suggestions,
        score,
    })
}

pub fn extract_suggestions(response_text: &str) -> Vec<String> {
    let suggestions: Vec<String> = SUGGESTION_RE
        .captures_iter(response_text)
        .map(|caps| caps[1].to_string())
        .collect();

    if !suggestions.is_empty() {
        return suggestions;
    }

    response_text
        .split('\n')
        .filter(|line| {
            let lowered = line.to_lowercase();
            !HEADING_PREFIXES.iter().any(|p| lowered.starts_with(p))
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Falls back to 0.0 when no table entry matches.
pub fn extract_score(response_text: &str) -> f64 {
    let lowered = response_text.to_lowercase();

    SCORE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.apply(&lowered))
        .unwrap_or(0.0)
}

pub fn extract_summary(response_text: &str) -> String {
    SUMMARY_RE
        .captures(response_text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

pub fn extract_explanation(response_text: &str) -> Option<String> {
    EXPLANATION_RE
        .captures(response_text)
        .map(|caps| caps[1].trim().to_string())
}

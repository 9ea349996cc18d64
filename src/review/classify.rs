//! Status and severity derivation for review feedback.
//!
//! Classification is a pure function of a comment: the same body, anchor
//! and provider state always produce the same result. Precedence lives in
//! ordered rule tables rather than nested conditionals so it stays
//! auditable and testable rule by rule.

use serde::{Deserialize, Serialize};

use crate::github::RawComment;

/// Resolution state of a comment.
///
/// `Unset` serializes as an empty string: top-level issue comments carry no
/// open/resolved concept by default, and the wire format keeps that as "".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentStatus {
    Open,
    Resolved,
    #[serde(rename = "")]
    Unset,
}

/// Coarse urgency of a comment, inferred from its text. Defaults to `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A raw comment plus its derived classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedComment {
    #[serde(flatten)]
    pub raw: RawComment,
    pub status: CommentStatus,
    pub severity: Severity,
}

/// Labeled fields that carry an explicit severity value, in priority order.
/// Structured bot output (`**Severity:** High`) beats keyword sniffing.
const LABEL_FIELDS: &[&str] = &[
    "**severity:**",
    "severity:",
    "**priority:**",
    "priority:",
    "**risk:**",
    "risk:",
];

struct KeywordRule {
    needles: &'static [&'static str],
    severity: Severity,
}

/// Grading of a labeled field's value.
const LABEL_VALUE_RULES: &[KeywordRule] = &[
    KeywordRule {
        needles: &["critical", "high"],
        severity: Severity::High,
    },
    KeywordRule {
        needles: &["medium", "moderate"],
        severity: Severity::Medium,
    },
];

/// Free-text fallback scan over the whole body, first hit wins.
const BODY_SCAN_RULES: &[KeywordRule] = &[
    KeywordRule {
        needles: &["critical", "🔴"],
        severity: Severity::High,
    },
    KeywordRule {
        needles: &["high risk", "security", "vulnerability"],
        severity: Severity::High,
    },
    KeywordRule {
        needles: &["medium", "moderate", "🟡", "⚠️"],
        severity: Severity::Medium,
    },
    KeywordRule {
        needles: &["warning:"],
        severity: Severity::Medium,
    },
    KeywordRule {
        needles: &["error:", "bug:"],
        severity: Severity::Medium,
    },
];

/// Terms marking a top-level comment as resolved.
const RESOLVED_MARKERS: &[&str] = &["resolved", "fixed", "✅", "✓"];

/// Derive status and severity for a raw comment. Pure, total, deterministic.
pub fn classify(comment: &RawComment) -> (CommentStatus, Severity) {
    (derive_status(comment), derive_severity(&comment.body))
}

/// Classify a comment, consuming it into its classified form.
pub fn classify_comment(raw: RawComment) -> ClassifiedComment {
    let (status, severity) = classify(&raw);
    ClassifiedComment {
        raw,
        status,
        severity,
    }
}

fn derive_status(comment: &RawComment) -> CommentStatus {
    if comment.is_inline() {
        // Inline review comment: the provider's resolution state decides.
        match &comment.state {
            Some(state) if state.eq_ignore_ascii_case("resolved") => CommentStatus::Resolved,
            _ => CommentStatus::Open,
        }
    } else {
        // Top-level issue comment: only explicit resolved markers in the body.
        let body = comment.body.to_lowercase();
        if RESOLVED_MARKERS.iter().any(|m| body.contains(m)) {
            CommentStatus::Resolved
        } else {
            CommentStatus::Unset
        }
    }
}

fn derive_severity(body: &str) -> Severity {
    let lower = body.to_lowercase();
    if let Some(value) = labeled_field_value(&lower) {
        return grade(value, LABEL_VALUE_RULES);
    }
    grade(&lower, BODY_SCAN_RULES)
}

/// Value of the first labeled severity/priority/risk field (priority order,
/// not text order), captured up to the end of its line.
fn labeled_field_value(lower: &str) -> Option<&str> {
    LABEL_FIELDS.iter().find_map(|label| {
        lower.find(label).map(|pos| {
            let rest = &lower[pos + label.len()..];
            rest.split('\n').next().unwrap_or(rest).trim()
        })
    })
}

fn grade(text: &str, rules: &[KeywordRule]) -> Severity {
    rules
        .iter()
        .find(|rule| rule.needles.iter().any(|needle| text.contains(needle)))
        .map(|rule| rule.severity)
        .unwrap_or(Severity::Low)
}

//! Suggested starter questions, submitted verbatim when picked.

pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What's the yield trend for the past 24 hours?",
    "Which equipment needs maintenance attention?",
    "Run a root cause analysis on Lot W2024-001",
    "Predict yield for the next 8 hours",
    "Show parameter correlations affecting yield",
    "Trace the data lineage for wafer test results",
];

/// Suggestion by 1-based position, as listed to the user.
pub fn suggestion(position: usize) -> Option<&'static str> {
    position
        .checked_sub(1)
        .and_then(|i| SUGGESTED_QUESTIONS.get(i).copied())
}

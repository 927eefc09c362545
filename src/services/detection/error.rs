// Detection Errors
// Conditions under which a text sample cannot be analyzed.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("Text is too short for analysis: {chars} characters, at least {min} required")]
    TooShortInput { chars: usize, min: usize },
    #[error(
        "Not enough text to analyze reliably: {sentences} sentence(s) and {words} word(s), \
         at least {min_sentences} sentences and {min_words} words required"
    )]
    InsufficientData {
        sentences: usize,
        words: usize,
        min_sentences: usize,
        min_words: usize,
    },
    #[error("Analysis failed: {feature} produced a non-finite value")]
    ComputationFault { feature: String },
}

impl DetectionError {
    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooShortInput { .. } => "too_short_input",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::ComputationFault { .. } => "computation_fault",
        }
    }

    /// Plain-language reason shown alongside a degenerate result.
    pub fn reason(&self) -> String {
        match self {
            Self::TooShortInput { min, .. } => format!(
                "The text is shorter than {} characters, so no reliable judgment can be made.",
                min
            ),
            Self::InsufficientData { .. } => {
                "The text has too few sentences or words for its style to be measured reliably."
                    .to_string()
            }
            Self::ComputationFault { .. } => {
                "The analysis could not be completed for this text.".to_string()
            }
        }
    }
}

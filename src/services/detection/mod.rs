// Detection Module
// Heuristic AI-text detection organized into specialized submodules:
// - lexicon: static word-rarity table and transition phrase list
// - features: builds the linguistic feature vector from a token stream
// - aggregation: normalizes features into sub-scores and a weighted anomaly score
// - explanation: ranks the strongest evidence into readable reasons
// - engine: validates input and orchestrates the pipeline

pub mod aggregation;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod features;
pub mod lexicon;

// Re-export commonly used items
pub use aggregation::{aggregate, confidence_for, Aggregation, Direction, FeatureRule, SubScore, DECISION_THRESHOLD, FEATURE_RULES};
pub use engine::{detect_text, DetectionEngine, Verdict};
pub use error::DetectionError;
pub use explanation::{explain, explain_detailed, Reason, NOTABLE_THRESHOLD};
pub use features::{extract, extract_with_config, Feature, FeatureVector};

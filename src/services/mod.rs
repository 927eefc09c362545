// Veriscan Core Services

pub mod config_store;
pub mod detection;
pub mod text_processor;

pub use config_store::*;
pub use text_processor::*;

pub use detection::{
    aggregate,
    detect_text,
    explain,
    extract,
    DetectionEngine,
    DetectionError,
    Feature,
    FeatureVector,
    Verdict,
};

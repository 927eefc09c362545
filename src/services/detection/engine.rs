// Detection Engine
// Public entry point: validates input, runs tokenize -> extract -> aggregate -> explain,
// and folds every failure into a well-formed degenerate result.

use crate::models::{AnalysisResult, BatchDetectResponse, BatchItemResult, BatchSummary, DISPLAY_SCALE};
use crate::services::config_store::DetectionConfig;
use crate::services::text_processor::tokenize;
use super::aggregation::{aggregate, Aggregation};
use super::error::DetectionError;
use super::explanation::{explain_detailed, Reason};
use super::features::{extract_with_config, FeatureVector};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tracing::{debug, info, warn};

/// Successful analysis, before flattening into an `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub features: FeatureVector,
    pub aggregation: Aggregation,
    pub reasons: Vec<Reason>,
}

impl Verdict {
    pub fn is_ai_generated(&self) -> bool {
        self.aggregation.is_ai_generated
    }

    pub fn to_result(&self) -> AnalysisResult {
        let Aggregation {
            score,
            confidence,
            is_ai_generated,
            ..
        } = self.aggregation;
        AnalysisResult {
            is_ai_generated,
            confidence,
            score,
            perplexity_score: score * DISPLAY_SCALE,
            burstiness_score: (1.0 - confidence) * DISPLAY_SCALE,
            reasons: self.reasons.iter().map(|r| r.message.clone()).collect(),
            error: None,
        }
    }
}

/// Stateless text classifier. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct DetectionEngine {
    config: DetectionConfig,
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyze one text, keeping failures distinguishable from a human verdict.
    pub fn analyze(&self, text: &str) -> Result<Verdict, DetectionError> {
        let chars = text.trim().chars().count();
        if chars < self.config.min_chars {
            return Err(DetectionError::TooShortInput {
                chars,
                min: self.config.min_chars,
            });
        }

        let stream = tokenize(text);
        let features = extract_with_config(&stream, &self.config)?;
        let aggregation = aggregate(&features);
        if !aggregation.score.is_finite() {
            return Err(DetectionError::ComputationFault {
                feature: "score".to_string(),
            });
        }
        let reasons = explain_detailed(&features, aggregation.score, self.config.notable_threshold);

        debug!(
            sentences = stream.sentence_count(),
            words = stream.word_count(),
            score = aggregation.score,
            confidence = aggregation.confidence,
            is_ai = aggregation.is_ai_generated,
            reasons = reasons.len(),
            "detection.verdict"
        );

        Ok(Verdict {
            features,
            aggregation,
            reasons,
        })
    }

    /// Analyze one text. Never fails and never panics past this boundary.
    pub fn detect(&self, text: &str) -> AnalysisResult {
        match guarded(|| self.analyze(text)) {
            Ok(verdict) => verdict.to_result(),
            Err(err) => degenerate_result(&err),
        }
    }

    /// Analyze independent texts on scoped worker threads, preserving input order.
    pub fn detect_batch<S>(&self, texts: &[S]) -> BatchDetectResponse
    where
        S: AsRef<str> + Sync,
    {
        let results = self.detect_all(texts);
        let summary = BatchSummary::from_results(&results);
        info!(
            count = summary.count,
            ai = summary.ai_count,
            degenerate = summary.degenerate_count,
            "detection.batch_complete"
        );
        BatchDetectResponse {
            items: results
                .into_iter()
                .enumerate()
                .map(|(index, result)| BatchItemResult { index, result })
                .collect(),
            summary,
        }
    }

    fn detect_all<S>(&self, texts: &[S]) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        if texts.is_empty() {
            return Vec::new();
        }
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(1, texts.len());
        let chunk_size = texts.len().div_ceil(workers);

        thread::scope(|scope| {
            let handles: Vec<_> = texts
                .chunks(chunk_size)
                .map(|part| {
                    let handle = scope.spawn(move || {
                        part.iter()
                            .map(|t| self.detect(t.as_ref()))
                            .collect::<Vec<_>>()
                    });
                    (part.len(), handle)
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|(len, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        let err = DetectionError::ComputationFault {
                            feature: "batch worker".to_string(),
                        };
                        vec![degenerate_result(&err); len]
                    })
                })
                .collect()
        })
    }
}

/// Run an analysis step, turning a panic into a computation fault.
fn guarded<T>(step: impl FnOnce() -> Result<T, DetectionError>) -> Result<T, DetectionError> {
    panic::catch_unwind(AssertUnwindSafe(step)).unwrap_or_else(|_| {
        Err(DetectionError::ComputationFault {
            feature: "analysis pipeline".to_string(),
        })
    })
}

fn degenerate_result(err: &DetectionError) -> AnalysisResult {
    match err {
        DetectionError::ComputationFault { feature } => {
            warn!(feature = %feature, "detection.computation_fault");
        }
        _ => info!(kind = err.kind(), error = %err, "detection.degenerate"),
    }
    AnalysisResult::degenerate(err.reason(), err.to_string())
}

/// Analyze one text with the default configuration.
pub fn detect_text(text: &str) -> AnalysisResult {
    DetectionEngine::default().detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Two uniform six-word sentences with three listed transitions.
    const UNIFORM_AI: &str = "Furthermore, this approach is widely adopted. \
        Moreover, additionally, results are carefully validated.";

    // Sentence lengths 3, 18, 5 and 22 with no transition phrases.
    const BURSTY_HUMAN: &str = "Nope, not today. My grandmother kept a jar of buttons on the \
        windowsill, and every winter we sorted them by color. The radiator clanked all night. \
        She never threw a single one away, not even the cracked brass ones from my \
        grandfather's army coat, which smelled of smoke.";

    const FORMAL_AI: &str = "Artificial intelligence is transforming various industries in \
        significant ways. Furthermore, it is important to note that these systems are designed \
        to enhance productivity. Additionally, organizations are increasingly adopting \
        comprehensive strategies to ensure success. Moreover, the potential benefits are widely \
        recognized by experts in the field. In conclusion, it is essential to understand the \
        key aspects of this approach.";

    fn assert_degenerate(result: &AnalysisResult) {
        assert!(result.error.is_some());
        assert!(!result.is_ai_generated);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.perplexity_score, 0.0);
        assert_eq!(result.burstiness_score, 0.0);
        assert_eq!(result.reasons.len(), 1);
    }

    #[test]
    fn test_uniform_transitions_classify_as_ai() {
        let engine = DetectionEngine::default();
        let verdict = engine.analyze(UNIFORM_AI).unwrap();
        assert_eq!(verdict.features.sentence_length_variance, 0.0);
        assert_eq!(verdict.features.avg_sentence_length, 6.0);

        let result = engine.detect(UNIFORM_AI);
        assert!(result.is_ai_generated);
        assert!(result.score > 0.5);
        assert!(result.error.is_none());
        assert!(result
            .reasons
            .iter()
            .any(|r| r.starts_with("Sentence length is unusually uniform")));
    }

    #[test]
    fn test_bursty_text_classifies_as_human() {
        let verdict = DetectionEngine::default().analyze(BURSTY_HUMAN).unwrap();
        assert_eq!(verdict.features.sentence_length_variance, 66.5);
        assert_eq!(verdict.features.transition_word_density, 0.0);

        let result = detect_text(BURSTY_HUMAN);
        assert!(!result.is_ai_generated);
        assert!(result.score < 0.5);
        assert!(result.error.is_none());
        assert!(result
            .reasons
            .iter()
            .any(|r| r.starts_with("Sentence length varies widely")));
    }

    #[test]
    fn test_formal_paragraph_classifies_as_ai() {
        let result = detect_text(FORMAL_AI);
        assert!(result.is_ai_generated);
        assert!(result.reasons[0].starts_with("Formal transition phrases appear often"));
    }

    #[test]
    fn test_empty_and_short_inputs_are_degenerate() {
        for text in ["", "0123456789", "   short but padded      "] {
            let result = detect_text(text);
            assert_degenerate(&result);
            assert!(result.error.unwrap().starts_with("Text is too short"));
        }
    }

    #[test]
    fn test_long_single_sentence_is_insufficient_data() {
        let text = "this sentence keeps going without any terminal mark at all for quite a while";
        let engine = DetectionEngine::default();
        assert!(matches!(
            engine.analyze(text),
            Err(DetectionError::InsufficientData { sentences: 1, .. })
        ));
        let result = engine.detect(text);
        assert_degenerate(&result);
        assert!(result.error.unwrap().starts_with("Not enough text"));
    }

    #[test]
    fn test_punctuation_only_input_is_degenerate() {
        let result = detect_text(&"?!. ".repeat(30));
        assert_degenerate(&result);
    }

    #[test]
    fn test_computation_fault_becomes_degenerate_result() {
        let err = DetectionError::ComputationFault {
            feature: "sentenceLengthVariance".to_string(),
        };
        let result = degenerate_result(&err);
        assert_degenerate(&result);
        assert!(result.error.unwrap().starts_with("Analysis failed"));
        assert_eq!(result.reasons[0], err.reason());
    }

    #[test]
    fn test_panic_inside_analysis_is_reported_as_fault() {
        let outcome = guarded::<()>(|| panic!("feature extraction blew up"));
        assert!(matches!(
            outcome,
            Err(DetectionError::ComputationFault { ref feature }) if feature == "analysis pipeline"
        ));
        assert_eq!(guarded(|| Ok(7)), Ok(7));
    }

    #[test]
    fn test_derived_display_scores() {
        let result = detect_text(FORMAL_AI);
        assert_eq!(result.perplexity_score, result.score * 10.0);
        assert_eq!(result.burstiness_score, (1.0 - result.confidence) * 10.0);
        assert_eq!(result.confidence, (2.0 * (result.score - 0.5)).abs().min(1.0));
    }

    #[test]
    fn test_custom_min_chars() {
        let engine = DetectionEngine::new(DetectionConfig {
            min_chars: 500,
            ..DetectionConfig::default()
        });
        assert!(matches!(
            engine.analyze(FORMAL_AI),
            Err(DetectionError::TooShortInput { min: 500, .. })
        ));
    }

    #[test]
    fn test_batch_preserves_order_and_summarizes() {
        let engine = DetectionEngine::default();
        let texts = vec![UNIFORM_AI, "tiny", BURSTY_HUMAN, FORMAL_AI];
        let response = engine.detect_batch(&texts);
        assert_eq!(response.items.len(), 4);
        for (i, item) in response.items.iter().enumerate() {
            assert_eq!(item.index, i);
            assert_eq!(item.result, engine.detect(texts[i]));
        }
        assert_eq!(response.summary.count, 4);
        assert_eq!(response.summary.ai_count, 2);
        assert_eq!(response.summary.degenerate_count, 1);
        assert!(engine.detect_batch::<&str>(&[]).items.is_empty());
    }

    #[test]
    fn test_parallel_calls_match_sequential() {
        let engine = DetectionEngine::default();
        let expected = engine.detect(FORMAL_AI);
        thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| engine.detect(FORMAL_AI))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_short_text_is_degenerate(text in "\\PC{0,49}") {
            prop_assume!(text.trim().chars().count() < 50);
            let result = detect_text(&text);
            prop_assert!(result.error.is_some());
            prop_assert_eq!(result.confidence, 0.0);
            prop_assert_eq!(result.score, 0.0);
            prop_assert!(!result.is_ai_generated);
        }

        #[test]
        fn prop_result_invariants(
            sentences in prop::collection::vec(
                prop::collection::vec("[a-zA-Z']{1,10}", 1..25),
                1..8,
            ),
            terminal in prop::sample::select(vec![". ", "! ", "? ", "\n"]),
        ) {
            let text = sentences
                .iter()
                .map(|words| words.join(" "))
                .collect::<Vec<_>>()
                .join(terminal);
            let result = detect_text(&text);
            prop_assert!(!result.reasons.is_empty());
            prop_assert!((0.0..=1.0).contains(&result.score));
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            if result.error.is_none() {
                prop_assert_eq!(result.is_ai_generated, result.score >= 0.5);
                prop_assert_eq!(result.perplexity_score, result.score * 10.0);
                prop_assert_eq!(result.burstiness_score, (1.0 - result.confidence) * 10.0);
            } else {
                prop_assert!(!result.is_ai_generated);
                prop_assert_eq!(result.confidence, 0.0);
            }
        }

        #[test]
        fn prop_detect_is_idempotent(text in "[a-zA-Z ,.!?\n]{0,400}") {
            let engine = DetectionEngine::default();
            prop_assert_eq!(engine.detect(&text), engine.detect(&text));
        }
    }
}

// Reason Generation
// Turns the strongest per-feature evidence into human-readable explanations.
// Reasons are advisory only and never feed back into the score.

use super::aggregation::{sub_scores, SubScore, DECISION_THRESHOLD};
use super::features::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};

/// Default evidence strength a feature needs before it earns its own reason.
pub const NOTABLE_THRESHOLD: f64 = 0.65;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub feature: Option<Feature>,
    /// Sub-score measured in the direction of the verdict.
    pub strength: f64,
    pub message: String,
}

fn ai_message(feature: Feature, value: f64) -> String {
    match feature {
        Feature::SentenceLengthVariance => format!(
            "Sentence length is unusually uniform (variance {:.1}), a pattern common in AI-generated text.",
            value
        ),
        Feature::TransitionWordDensity => format!(
            "Formal transition phrases appear often ({:.1} per 100 words), typical of machine-structured prose.",
            value * 100.0
        ),
        Feature::AvgWordRarity => format!(
            "Word choice leans heavily on common and connective vocabulary (rarity {:.2}), suggesting low perplexity.",
            value
        ),
        Feature::VocabularyDiversity => format!(
            "Vocabulary diversity is low ({:.0}% unique words), reflecting template-like phrasing.",
            value * 100.0
        ),
        Feature::WordRepetitionRate => format!(
            "Words are repeated at short range ({:.0}% of words), a sign of generated text.",
            value * 100.0
        ),
        Feature::PunctuationRegularity => format!(
            "Punctuation is spaced with mechanical regularity (variation {:.2}).",
            value
        ),
        Feature::PassiveVoiceDensity => format!(
            "Passive constructions appear in {:.0}% of sentences, a documented tendency of AI writing.",
            value * 100.0
        ),
        Feature::AvgSentenceLength => format!(
            "Sentences are consistently long ({:.1} words on average), as often seen in AI-generated text.",
            value
        ),
    }
}

fn human_message(feature: Feature, value: f64) -> String {
    match feature {
        Feature::SentenceLengthVariance => format!(
            "Sentence length varies widely (variance {:.1}), a bursty rhythm typical of human writing.",
            value
        ),
        Feature::TransitionWordDensity => format!(
            "Formal transition phrases are rare ({:.1} per 100 words), as in natural human prose.",
            value * 100.0
        ),
        Feature::AvgWordRarity => format!(
            "Word choice is varied and idiosyncratic (rarity {:.2}), suggesting high perplexity.",
            value
        ),
        Feature::VocabularyDiversity => format!(
            "Vocabulary is diverse ({:.0}% unique words), typical of human authors.",
            value * 100.0
        ),
        Feature::WordRepetitionRate => format!(
            "Little short-range word repetition ({:.0}% of words), consistent with human writing.",
            value * 100.0
        ),
        Feature::PunctuationRegularity => format!(
            "Punctuation spacing is irregular (variation {:.2}), as in natural writing.",
            value
        ),
        Feature::PassiveVoiceDensity => format!(
            "Passive constructions are uncommon ({:.0}% of sentences), favoring a human author.",
            value * 100.0
        ),
        Feature::AvgSentenceLength => format!(
            "Sentences are short on average ({:.1} words), a conversational human pattern.",
            value
        ),
    }
}

fn aggregate_only_message(is_ai: bool) -> String {
    let verdict = if is_ai { "AI-generated" } else { "human-written" };
    format!(
        "The text was judged {} from the combined signals; no single feature stood out on its own.",
        verdict
    )
}

/// Ordered reasons with their evidence strength, strongest first.
pub fn explain_detailed(features: &FeatureVector, score: f64, notable_threshold: f64) -> Vec<Reason> {
    let is_ai = score >= DECISION_THRESHOLD;
    let mut reasons: Vec<Reason> = sub_scores(features)
        .into_iter()
        .filter_map(|SubScore { feature, value, score: sub_score, .. }| {
            let strength = if is_ai { sub_score } else { 1.0 - sub_score };
            if strength < notable_threshold {
                return None;
            }
            let message = if is_ai {
                ai_message(feature, value)
            } else {
                human_message(feature, value)
            };
            Some(Reason {
                feature: Some(feature),
                strength,
                message,
            })
        })
        .collect();

    // Stable sort keeps rule-table order between equal strengths.
    reasons.sort_by(|a, b| b.strength.total_cmp(&a.strength));

    if reasons.is_empty() {
        reasons.push(Reason {
            feature: None,
            strength: 0.0,
            message: aggregate_only_message(is_ai),
        });
    }
    reasons
}

/// Reason messages for a verdict, strongest evidence first.
pub fn explain(features: &FeatureVector, score: f64) -> Vec<String> {
    explain_detailed(features, score, NOTABLE_THRESHOLD)
        .into_iter()
        .map(|r| r.message)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::aggregation::{aggregate, FEATURE_RULES};

    fn uniform_features() -> FeatureVector {
        FeatureVector {
            avg_sentence_length: 12.0,
            sentence_length_variance: 0.0,
            vocabulary_diversity: 0.9,
            word_repetition_rate: 0.05,
            avg_word_rarity: 0.4,
            transition_word_density: 0.2,
            punctuation_regularity: 0.5,
            passive_voice_density: 0.0,
        }
    }

    fn centered_features() -> FeatureVector {
        let mut features = FeatureVector::default();
        for rule in &FEATURE_RULES {
            features.set(rule.feature, rule.center);
        }
        features
    }

    #[test]
    fn test_ai_reasons_sorted_by_strength() {
        let features = uniform_features();
        let score = aggregate(&features).score;
        assert!(score >= 0.5);
        let reasons = explain_detailed(&features, score, NOTABLE_THRESHOLD);
        assert!(reasons.len() >= 2);
        assert!(reasons.windows(2).all(|w| w[0].strength >= w[1].strength));
        assert!(reasons.iter().all(|r| r.strength >= NOTABLE_THRESHOLD));
        assert_eq!(reasons[0].feature, Some(Feature::TransitionWordDensity));
        assert!(reasons
            .iter()
            .any(|r| r.message.starts_with("Sentence length is unusually uniform")));
    }

    #[test]
    fn test_human_reasons_use_human_templates() {
        let mut features = centered_features();
        features.sentence_length_variance = 90.0;
        features.transition_word_density = 0.0;
        let score = aggregate(&features).score;
        assert!(score < 0.5);
        let reasons = explain(&features, score);
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].starts_with("Sentence length varies widely"));
        assert!(reasons[1].starts_with("Formal transition phrases are rare"));
    }

    #[test]
    fn test_generic_reason_when_nothing_stands_out() {
        let features = centered_features();
        let reasons = explain_detailed(&features, 0.5, NOTABLE_THRESHOLD);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].feature, None);
        assert!(reasons[0].message.contains("AI-generated"));

        let reasons = explain(&features, 0.49);
        assert!(reasons[0].contains("human-written"));
    }

    #[test]
    fn test_threshold_controls_reason_count() {
        let features = uniform_features();
        let score = aggregate(&features).score;
        let strict = explain_detailed(&features, score, 0.99);
        let loose = explain_detailed(&features, score, 0.5);
        assert!(strict.len() <= loose.len());
    }
}

// Aggregation Logic
// Normalizes each feature into an AI-likelihood sub-score and combines them
// into one anomaly score with a confidence derived from its distance to the threshold.

use super::features::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};

/// Scores at or above this value are classified as AI-generated.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Which end of a feature's range points toward machine-generated text.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsAi,
    LowerIsAi,
}

/// One row of the normalization table: a logistic curve plus its weight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeatureRule {
    pub feature: Feature,
    pub direction: Direction,
    pub center: f64,
    /// Width of the transition around `center`. Larger values give a gentler curve.
    pub scale: f64,
    pub weight: f64,
}

impl FeatureRule {
    /// Monotonic map of the raw feature value into [0, 1].
    ///
    /// Strictly monotonic while `abs(value - center) / scale` stays below about 700.
    /// Past that the curve underflows in f64 and settles at exactly 0 or 1.
    pub fn normalize(&self, value: f64) -> f64 {
        let s = match self.direction {
            Direction::LowerIsAi => sigmoid(value, self.center, self.scale),
            Direction::HigherIsAi => sigmoid_inv(value, self.center, self.scale),
        };
        s.clamp(0.0, 1.0)
    }
}

/// Normalization table. Weights sum to 1.0 and none exceeds 0.25.
pub static FEATURE_RULES: [FeatureRule; 8] = [
    FeatureRule {
        feature: Feature::SentenceLengthVariance,
        direction: Direction::LowerIsAi,
        center: 25.0,
        scale: 10.0,
        weight: 0.22,
    },
    FeatureRule {
        feature: Feature::TransitionWordDensity,
        direction: Direction::HigherIsAi,
        center: 0.025,
        scale: 0.008,
        weight: 0.18,
    },
    FeatureRule {
        feature: Feature::AvgWordRarity,
        direction: Direction::LowerIsAi,
        center: 0.50,
        scale: 0.08,
        weight: 0.15,
    },
    FeatureRule {
        feature: Feature::VocabularyDiversity,
        direction: Direction::LowerIsAi,
        center: 0.55,
        scale: 0.07,
        weight: 0.12,
    },
    FeatureRule {
        feature: Feature::WordRepetitionRate,
        direction: Direction::HigherIsAi,
        center: 0.18,
        scale: 0.05,
        weight: 0.10,
    },
    FeatureRule {
        feature: Feature::PunctuationRegularity,
        direction: Direction::LowerIsAi,
        center: 0.50,
        scale: 0.15,
        weight: 0.10,
    },
    FeatureRule {
        feature: Feature::PassiveVoiceDensity,
        direction: Direction::HigherIsAi,
        center: 0.30,
        scale: 0.10,
        weight: 0.08,
    },
    FeatureRule {
        feature: Feature::AvgSentenceLength,
        direction: Direction::HigherIsAi,
        center: 20.0,
        scale: 5.0,
        weight: 0.05,
    },
];

pub fn rule_for(feature: Feature) -> &'static FeatureRule {
    let index = match feature {
        Feature::SentenceLengthVariance => 0,
        Feature::TransitionWordDensity => 1,
        Feature::AvgWordRarity => 2,
        Feature::VocabularyDiversity => 3,
        Feature::WordRepetitionRate => 4,
        Feature::PunctuationRegularity => 5,
        Feature::PassiveVoiceDensity => 6,
        Feature::AvgSentenceLength => 7,
    };
    &FEATURE_RULES[index]
}

/// Falling logistic: 1 well below `center`, 0 well above.
#[inline]
fn sigmoid(x: f64, center: f64, k: f64) -> f64 {
    1.0 / (1.0 + ((x - center) / k).exp())
}

/// Rising logistic, the mirror of `sigmoid`.
#[inline]
fn sigmoid_inv(x: f64, center: f64, k: f64) -> f64 {
    1.0 / (1.0 + ((center - x) / k).exp())
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScore {
    pub feature: Feature,
    pub value: f64,
    /// AI-likelihood of this feature alone, in [0, 1].
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub score: f64,
    pub confidence: f64,
    pub is_ai_generated: bool,
    pub sub_scores: Vec<SubScore>,
}

/// Sub-scores in rule-table order.
pub fn sub_scores(features: &FeatureVector) -> Vec<SubScore> {
    FEATURE_RULES
        .iter()
        .map(|rule| {
            let value = features.get(rule.feature);
            SubScore {
                feature: rule.feature,
                value,
                score: rule.normalize(value),
                weight: rule.weight,
            }
        })
        .collect()
}

/// `min(1, 2 * |score - 0.5|)`: zero on the boundary, one at the extremes.
pub fn confidence_for(score: f64) -> f64 {
    (2.0 * (score - DECISION_THRESHOLD).abs()).min(1.0)
}

/// Combine the feature vector into score, confidence and verdict.
pub fn aggregate(features: &FeatureVector) -> Aggregation {
    let sub_scores = sub_scores(features);
    let score = sub_scores
        .iter()
        .map(|s| s.score * s.weight)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    Aggregation {
        score,
        confidence: confidence_for(score),
        is_ai_generated: score >= DECISION_THRESHOLD,
        sub_scores,
    }
}

// Veriscan Data Models
// Result records returned across the engine boundary

use serde::{Deserialize, Serialize};

/// Display scale applied to the score and its complement.
pub const DISPLAY_SCALE: f64 = 10.0;

// ============ Detection Result ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    pub confidence: f64,
    /// Aggregated anomaly score before thresholding.
    pub score: f64,
    /// `score * 10`, for display.
    pub perplexity_score: f64,
    /// `(1 - confidence) * 10`, for display.
    pub burstiness_score: f64,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Conservative result for input that could not be analyzed.
    pub fn degenerate(reason: String, error: String) -> Self {
        Self {
            is_ai_generated: false,
            confidence: 0.0,
            score: 0.0,
            perplexity_score: 0.0,
            burstiness_score: 0.0,
            reasons: vec![reason],
            error: Some(error),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.error.is_some()
    }
}

// ============ Batch Detection ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub count: usize,
    pub ai_count: usize,
    pub degenerate_count: usize,
    /// Mean score over non-degenerate items; 0 when there are none.
    pub avg_score: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let analyzed: Vec<&AnalysisResult> = results.iter().filter(|r| !r.is_degenerate()).collect();
        let avg_score = if analyzed.is_empty() {
            0.0
        } else {
            analyzed.iter().map(|r| r.score).sum::<f64>() / analyzed.len() as f64
        };
        Self {
            count: results.len(),
            ai_count: results.iter().filter(|r| r.is_ai_generated).count(),
            degenerate_count: results.len() - analyzed.len(),
            avg_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDetectResponse {
    pub items: Vec<BatchItemResult>,
    pub summary: BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(score: f64) -> AnalysisResult {
        AnalysisResult {
            is_ai_generated: score >= 0.5,
            confidence: (2.0 * (score - 0.5_f64).abs()).min(1.0),
            score,
            perplexity_score: score * DISPLAY_SCALE,
            burstiness_score: 0.0,
            reasons: vec!["r".to_string()],
            error: None,
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(verdict(0.8)).unwrap();
        assert_eq!(json["isAIGenerated"], true);
        assert!(json.get("perplexityScore").is_some());
        assert!(json.get("burstinessScore").is_some());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_degenerate_shape() {
        let result = AnalysisResult::degenerate("why".to_string(), "what".to_string());
        assert!(result.is_degenerate());
        assert!(!result.is_ai_generated);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.reasons, vec!["why".to_string()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "what");
    }

    #[test]
    fn test_batch_summary() {
        let results = vec![
            verdict(0.8),
            verdict(0.2),
            AnalysisResult::degenerate("why".to_string(), "what".to_string()),
        ];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.ai_count, 1);
        assert_eq!(summary.degenerate_count, 1);
        assert!((summary.avg_score - 0.5).abs() < 1e-12);
        assert_eq!(BatchSummary::from_results(&[]), BatchSummary::default());
    }
}

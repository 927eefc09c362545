// Feature Extraction
// Computes the fixed linguistic feature vector from a token stream.
//
// Every feature reads the token stream directly; none depends on another
// feature's value.

use crate::services::config_store::DetectionConfig;
use crate::services::text_processor::TokenStream;
use super::error::DetectionError;
use super::lexicon::{transition_patterns, word_rarity};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Punctuation spacing CV used when there are too few marks to measure.
pub const NEUTRAL_PUNCTUATION_CV: f64 = 0.5;

/// Closed set of feature names.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    AvgSentenceLength,
    SentenceLengthVariance,
    VocabularyDiversity,
    WordRepetitionRate,
    AvgWordRarity,
    TransitionWordDensity,
    PunctuationRegularity,
    PassiveVoiceDensity,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::AvgSentenceLength,
        Feature::SentenceLengthVariance,
        Feature::VocabularyDiversity,
        Feature::WordRepetitionRate,
        Feature::AvgWordRarity,
        Feature::TransitionWordDensity,
        Feature::PunctuationRegularity,
        Feature::PassiveVoiceDensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::AvgSentenceLength => "avgSentenceLength",
            Feature::SentenceLengthVariance => "sentenceLengthVariance",
            Feature::VocabularyDiversity => "vocabularyDiversity",
            Feature::WordRepetitionRate => "wordRepetitionRate",
            Feature::AvgWordRarity => "avgWordRarity",
            Feature::TransitionWordDensity => "transitionWordDensity",
            Feature::PunctuationRegularity => "punctuationRegularity",
            Feature::PassiveVoiceDensity => "passiveVoiceDensity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub avg_sentence_length: f64,
    /// Population variance of words per sentence (burstiness proxy).
    pub sentence_length_variance: f64,
    pub vocabulary_diversity: f64,
    pub word_repetition_rate: f64,
    /// Mean rarity weight per word (perplexity proxy).
    pub avg_word_rarity: f64,
    pub transition_word_density: f64,
    /// Coefficient of variation of punctuation spacing; low means mechanical.
    pub punctuation_regularity: f64,
    pub passive_voice_density: f64,
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::AvgSentenceLength => self.avg_sentence_length,
            Feature::SentenceLengthVariance => self.sentence_length_variance,
            Feature::VocabularyDiversity => self.vocabulary_diversity,
            Feature::WordRepetitionRate => self.word_repetition_rate,
            Feature::AvgWordRarity => self.avg_word_rarity,
            Feature::TransitionWordDensity => self.transition_word_density,
            Feature::PunctuationRegularity => self.punctuation_regularity,
            Feature::PassiveVoiceDensity => self.passive_voice_density,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        match feature {
            Feature::AvgSentenceLength => self.avg_sentence_length = value,
            Feature::SentenceLengthVariance => self.sentence_length_variance = value,
            Feature::VocabularyDiversity => self.vocabulary_diversity = value,
            Feature::WordRepetitionRate => self.word_repetition_rate = value,
            Feature::AvgWordRarity => self.avg_word_rarity = value,
            Feature::TransitionWordDensity => self.transition_word_density = value,
            Feature::PunctuationRegularity => self.punctuation_regularity = value,
            Feature::PassiveVoiceDensity => self.passive_voice_density = value,
        }
    }

    pub fn to_map(&self) -> HashMap<&'static str, f64> {
        Feature::ALL.iter().map(|f| (f.name(), self.get(*f))).collect()
    }

    /// First feature holding NaN or infinity, if any.
    pub fn first_non_finite(&self) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| !self.get(*f).is_finite())
    }
}

/// Extract the feature vector with default density requirements.
pub fn extract(stream: &TokenStream) -> Result<FeatureVector, DetectionError> {
    extract_with_config(stream, &DetectionConfig::default())
}

pub fn extract_with_config(
    stream: &TokenStream,
    config: &DetectionConfig,
) -> Result<FeatureVector, DetectionError> {
    let sentences = stream.sentence_count();
    let words = stream.word_count();
    if sentences < config.min_sentences.max(1) || words < config.min_words.max(1) {
        return Err(DetectionError::InsufficientData {
            sentences,
            words,
            min_sentences: config.min_sentences,
            min_words: config.min_words,
        });
    }

    let lengths = stream.sentence_lengths();
    let lower = stream.lowercase_words();

    let features = FeatureVector {
        avg_sentence_length: mean_len(&lengths),
        sentence_length_variance: population_variance(&lengths),
        vocabulary_diversity: vocabulary_diversity(&lower),
        word_repetition_rate: word_repetition_rate(&lower, config.repetition_window),
        avg_word_rarity: avg_word_rarity(&lower),
        transition_word_density: transition_word_density(stream),
        punctuation_regularity: punctuation_regularity(&stream.punctuation_offsets),
        passive_voice_density: passive_voice_density(stream),
    };

    if let Some(feature) = features.first_non_finite() {
        return Err(DetectionError::ComputationFault {
            feature: feature.name().to_string(),
        });
    }

    Ok(features)
}

fn mean_len(lengths: &[usize]) -> f64 {
    if lengths.is_empty() {
        return 0.0;
    }
    lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
}

/// Population (not sample) variance of sentence lengths.
pub fn population_variance(lengths: &[usize]) -> f64 {
    if lengths.is_empty() {
        return 0.0;
    }
    let mean = mean_len(lengths);
    lengths
        .iter()
        .map(|&l| (l as f64 - mean).powi(2))
        .sum::<f64>()
        / lengths.len() as f64
}

/// Unique lower-cased words over total words.
pub fn vocabulary_diversity(lower: &[String]) -> f64 {
    if lower.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = lower.iter().map(String::as_str).collect();
    unique.len() as f64 / lower.len() as f64
}

/// Fraction of words already used within the preceding `window` words.
pub fn word_repetition_rate(lower: &[String], window: usize) -> f64 {
    if lower.is_empty() || window == 0 {
        return 0.0;
    }
    let repeats = lower
        .iter()
        .enumerate()
        .filter(|(i, word)| {
            let start = i.saturating_sub(window);
            lower[start..*i].contains(*word)
        })
        .count();
    repeats as f64 / lower.len() as f64
}

pub fn avg_word_rarity(lower: &[String]) -> f64 {
    if lower.is_empty() {
        return 0.0;
    }
    lower.iter().map(|w| word_rarity(w)).sum::<f64>() / lower.len() as f64
}

/// Transition phrase occurrences per word. Phrases match within one sentence,
/// longest first, without overlap.
pub fn transition_word_density(stream: &TokenStream) -> f64 {
    let total = stream.word_count();
    if total == 0 {
        return 0.0;
    }
    let patterns = transition_patterns();
    let mut hits = 0usize;

    for sentence in &stream.sentences {
        let words = sentence.lowercase_words();
        let mut i = 0;
        while i < words.len() {
            let matched = patterns.iter().find(|p| {
                i + p.len() <= words.len()
                    && p.iter().zip(&words[i..]).all(|(a, b)| *a == b.as_str())
            });
            match matched {
                Some(p) => {
                    hits += 1;
                    i += p.len();
                }
                None => i += 1,
            }
        }
    }

    hits as f64 / total as f64
}

/// Coefficient of variation of the gaps between successive punctuation marks.
pub fn punctuation_regularity(offsets: &[usize]) -> f64 {
    if offsets.len() < 3 {
        return NEUTRAL_PUNCTUATION_CV;
    }
    let gaps: Vec<f64> = offsets
        .windows(2)
        .map(|w| w[1].saturating_sub(w[0]).saturating_sub(1) as f64)
        .collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if mean <= 0.0 {
        return NEUTRAL_PUNCTUATION_CV;
    }
    let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
    variance.sqrt() / mean
}

/// Irregular past participles that do not end in "-ed".
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "made", "done", "known", "shown", "seen", "given", "taken", "written", "chosen",
    "broken", "spoken", "driven", "hidden", "forgotten", "eaten", "beaten", "bitten",
    "stolen", "frozen", "woken", "proven", "sworn", "torn", "worn", "born", "drawn",
    "grown", "thrown", "blown", "flown", "begun", "sung", "rung", "drunk", "sunk",
    "struck", "stuck", "hung", "spun", "won", "built", "found", "held", "told", "sent",
    "brought", "bought", "caught", "taught", "thought", "fought", "sought", "kept",
    "left", "felt", "dealt", "meant", "spent", "lent", "bent", "lit", "paid", "laid",
    "said", "sold", "heard", "lost", "met", "led", "fed", "read", "set", "put", "cut",
    "hit", "hurt", "shut", "let", "run", "understood",
];

/// Words ending in "-ed" that are not participles.
const ED_NON_PARTICIPLES: &[&str] = &[
    "indeed", "need", "seed", "speed", "feed", "breed", "greed", "weed", "bleed",
    "hundred", "sacred", "naked", "wicked", "rugged", "kindred",
];

fn passive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"\b(?:am|is|are|was|were|be|been|being|get|gets|got|gotten)\s+(?:\w+ly\s+)?(?P<participle>\w{{2,}}ed|{})\b",
            IRREGULAR_PARTICIPLES.join("|")
        );
        Regex::new(&pattern).expect("passive regex")
    })
}

fn has_passive(sentence: &str) -> bool {
    passive_re().captures_iter(sentence).any(|caps| {
        caps.name("participle")
            .is_some_and(|p| !ED_NON_PARTICIPLES.contains(&p.as_str()))
    })
}

/// Share of sentences containing an auxiliary + past participle construction.
pub fn passive_voice_density(stream: &TokenStream) -> f64 {
    let sentences = stream.sentence_count();
    if sentences == 0 {
        return 0.0;
    }
    let passive = stream
        .sentences
        .iter()
        .filter(|s| has_passive(&s.lowercase_words().join(" ")))
        .count();
    passive as f64 / sentences as f64
}

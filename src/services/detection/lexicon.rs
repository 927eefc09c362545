// Lexicon
// Static word-rarity table and transition phrase list used by feature extraction.
//
// Both tables are read-only constants; lookup indexes are built once on first use.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Rarity assigned to any word missing from the frequency table.
pub const RARE_WORD_WEIGHT: f64 = 1.0;

const CORE_FUNCTION: f64 = 0.1;
const AUXILIARY: f64 = 0.2;
const PRONOUN: f64 = 0.25;
const CONNECTIVE: f64 = 0.35;

/// Common function and connective words with their rarity weight.
/// Lower weight means more common (less surprising) vocabulary.
static WORD_RARITY: &[(&str, f64)] = &[
    // core function words
    ("the", CORE_FUNCTION),
    ("of", CORE_FUNCTION),
    ("and", CORE_FUNCTION),
    ("a", CORE_FUNCTION),
    ("an", CORE_FUNCTION),
    ("to", CORE_FUNCTION),
    ("in", CORE_FUNCTION),
    ("is", CORE_FUNCTION),
    ("it", CORE_FUNCTION),
    ("that", CORE_FUNCTION),
    ("for", CORE_FUNCTION),
    ("on", CORE_FUNCTION),
    ("as", CORE_FUNCTION),
    ("with", CORE_FUNCTION),
    ("was", CORE_FUNCTION),
    ("be", CORE_FUNCTION),
    ("by", CORE_FUNCTION),
    ("this", CORE_FUNCTION),
    ("are", CORE_FUNCTION),
    ("at", CORE_FUNCTION),
    ("or", CORE_FUNCTION),
    ("from", CORE_FUNCTION),
    ("not", CORE_FUNCTION),
    ("but", CORE_FUNCTION),
    // auxiliaries, determiners, quantifiers
    ("have", AUXILIARY),
    ("has", AUXILIARY),
    ("had", AUXILIARY),
    ("were", AUXILIARY),
    ("been", AUXILIARY),
    ("being", AUXILIARY),
    ("will", AUXILIARY),
    ("would", AUXILIARY),
    ("can", AUXILIARY),
    ("could", AUXILIARY),
    ("should", AUXILIARY),
    ("may", AUXILIARY),
    ("might", AUXILIARY),
    ("must", AUXILIARY),
    ("do", AUXILIARY),
    ("does", AUXILIARY),
    ("did", AUXILIARY),
    ("which", AUXILIARY),
    ("who", AUXILIARY),
    ("what", AUXILIARY),
    ("when", AUXILIARY),
    ("where", AUXILIARY),
    ("there", AUXILIARY),
    ("these", AUXILIARY),
    ("those", AUXILIARY),
    ("such", AUXILIARY),
    ("than", AUXILIARY),
    ("then", AUXILIARY),
    ("so", AUXILIARY),
    ("if", AUXILIARY),
    ("into", AUXILIARY),
    ("about", AUXILIARY),
    ("over", AUXILIARY),
    ("also", AUXILIARY),
    ("more", AUXILIARY),
    ("most", AUXILIARY),
    ("other", AUXILIARY),
    ("some", AUXILIARY),
    ("any", AUXILIARY),
    ("each", AUXILIARY),
    ("all", AUXILIARY),
    ("both", AUXILIARY),
    ("many", AUXILIARY),
    ("very", AUXILIARY),
    // pronouns
    ("i", PRONOUN),
    ("me", PRONOUN),
    ("my", PRONOUN),
    ("we", PRONOUN),
    ("us", PRONOUN),
    ("our", PRONOUN),
    ("you", PRONOUN),
    ("your", PRONOUN),
    ("he", PRONOUN),
    ("him", PRONOUN),
    ("his", PRONOUN),
    ("she", PRONOUN),
    ("her", PRONOUN),
    ("they", PRONOUN),
    ("them", PRONOUN),
    ("their", PRONOUN),
    ("its", PRONOUN),
    // formal connective and filler vocabulary
    ("however", CONNECTIVE),
    ("therefore", CONNECTIVE),
    ("furthermore", CONNECTIVE),
    ("moreover", CONNECTIVE),
    ("additionally", CONNECTIVE),
    ("consequently", CONNECTIVE),
    ("overall", CONNECTIVE),
    ("ultimately", CONNECTIVE),
    ("notably", CONNECTIVE),
    ("particularly", CONNECTIVE),
    ("significant", CONNECTIVE),
    ("significantly", CONNECTIVE),
    ("various", CONNECTIVE),
    ("numerous", CONNECTIVE),
    ("crucial", CONNECTIVE),
    ("essential", CONNECTIVE),
    ("important", CONNECTIVE),
    ("ensure", CONNECTIVE),
    ("enhance", CONNECTIVE),
    ("comprehensive", CONNECTIVE),
    ("effectively", CONNECTIVE),
    ("including", CONNECTIVE),
    ("provide", CONNECTIVE),
    ("provides", CONNECTIVE),
    ("key", CONNECTIVE),
    ("potential", CONNECTIVE),
    ("approach", CONNECTIVE),
    ("aspects", CONNECTIVE),
    ("role", CONNECTIVE),
    ("valuable", CONNECTIVE),
];

/// Formal discourse connectives, lower-cased, words separated by single spaces.
pub static TRANSITION_PHRASES: &[&str] = &[
    "additionally",
    "furthermore",
    "moreover",
    "consequently",
    "therefore",
    "however",
    "nevertheless",
    "nonetheless",
    "hence",
    "thus",
    "accordingly",
    "subsequently",
    "similarly",
    "notably",
    "ultimately",
    "overall",
    "in addition",
    "as a result",
    "in conclusion",
    "to conclude",
    "in summary",
    "to summarize",
    "in particular",
    "in contrast",
    "on the other hand",
    "for example",
    "for instance",
    "in other words",
    "first and foremost",
    "it is important to note",
    "it is worth noting",
    "it should be noted",
];

fn rarity_index() -> &'static HashMap<&'static str, f64> {
    static INDEX: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    INDEX.get_or_init(|| WORD_RARITY.iter().copied().collect())
}

/// Transition phrases pre-split into words, longest first so matching is greedy.
pub fn transition_patterns() -> &'static [Vec<&'static str>] {
    static PATTERNS: OnceLock<Vec<Vec<&'static str>>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let mut patterns: Vec<Vec<&'static str>> = TRANSITION_PHRASES
            .iter()
            .map(|p| p.split_whitespace().collect())
            .collect();
        patterns.sort_by(|a, b| b.len().cmp(&a.len()));
        patterns
    })
}

/// Rarity weight of a lower-cased word.
pub fn word_rarity(word: &str) -> f64 {
    rarity_index()
        .get(word)
        .copied()
        .unwrap_or(RARE_WORD_WEIGHT)
}

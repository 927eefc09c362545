// Text Processing Service
// Splits raw text into sentences and words for feature extraction

use serde::{Deserialize, Serialize};

/// One sentence as an ordered list of words (original casing preserved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub words: Vec<String>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn lowercase_words(&self) -> Vec<String> {
        self.words.iter().map(|w| w.to_lowercase()).collect()
    }
}

/// Tokenized view of one text sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStream {
    pub sentences: Vec<Sentence>,
    /// Code-point offsets of punctuation marks in the source text, ascending.
    pub punctuation_offsets: Vec<usize>,
}

impl TokenStream {
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// All words in order, original casing.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.sentences
            .iter()
            .flat_map(|s| s.words.iter().map(String::as_str))
    }

    /// All words in order, lower-cased.
    pub fn lowercase_words(&self) -> Vec<String> {
        self.words().map(str::to_lowercase).collect()
    }

    pub fn sentence_lengths(&self) -> Vec<usize> {
        self.sentences.iter().map(Sentence::len).collect()
    }
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？')
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || is_apostrophe(ch) || ch == '-'
}

/// Punctuation marks counted for spacing regularity. Apostrophes, hyphens and
/// underscores live inside words and are not counted.
pub fn is_punctuation_mark(ch: char) -> bool {
    if ch.is_ascii_punctuation() {
        return !matches!(ch, '\'' | '-' | '_');
    }
    matches!(
        ch,
        '\u{2026}' // …
            | '\u{2014}' // —
            | '\u{2013}' // –
            | '\u{201c}' // “
            | '\u{201d}' // ”
            | '\u{00ab}' // «
            | '\u{00bb}' // »
            | '，'
            | '。'
            | '！'
            | '？'
            | '；'
            | '：'
    )
}

/// Whether the terminal mark at `i` ends a sentence.
/// A mark glued to a following lowercase letter or digit is an abbreviation
/// or decimal point, not a boundary.
fn ends_sentence(chars: &[char], i: usize) -> bool {
    match chars.get(i + 1) {
        Some(next) => !(next.is_lowercase() || next.is_numeric()),
        None => true,
    }
}

/// Split one whitespace-free chunk into words.
/// `.` and `,` between two digits stay inside the word (`3.14`, `1,000`).
fn push_chunk_words(chunk: &[char], out: &mut Vec<String>) {
    let mut current = String::new();
    for (i, &ch) in chunk.iter().enumerate() {
        let numeric_separator = matches!(ch, '.' | ',')
            && i > 0
            && chunk[i - 1].is_numeric()
            && chunk.get(i + 1).is_some_and(|c| c.is_numeric());

        if is_word_char(ch) || numeric_separator {
            current.push(ch);
        } else {
            flush_word(&mut current, out);
        }
    }
    flush_word(&mut current, out);
}

fn flush_word(current: &mut String, out: &mut Vec<String>) {
    let trimmed = current.trim_matches(|c: char| is_apostrophe(c) || c == '-');
    if trimmed.chars().any(char::is_alphanumeric) {
        out.push(trimmed.to_string());
    }
    current.clear();
}

fn split_words(chars: &[char]) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in chars.split(|c| c.is_whitespace()) {
        if !chunk.is_empty() {
            push_chunk_words(chunk, &mut words);
        }
    }
    words
}

/// Full-text word tokenization, ignoring sentence structure.
pub fn words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    split_words(&chars)
}

/// Tokenize text into sentences and words.
///
/// Total over any input: degenerate text yields an empty stream. Sentences with
/// no words after stripping are discarded.
pub fn tokenize(text: &str) -> TokenStream {
    let chars: Vec<char> = text.chars().collect();
    let mut stream = TokenStream::default();
    let mut sentence_start = 0usize;

    for (i, &ch) in chars.iter().enumerate() {
        if is_punctuation_mark(ch) {
            stream.punctuation_offsets.push(i);
        }

        let boundary = is_line_break(ch) || (is_terminal(ch) && ends_sentence(&chars, i));
        if boundary {
            push_sentence(&chars[sentence_start..i], &mut stream);
            sentence_start = i + 1;
        }
    }
    push_sentence(&chars[sentence_start..], &mut stream);

    stream
}

fn push_sentence(chars: &[char], stream: &mut TokenStream) {
    let words = split_words(chars);
    if !words.is_empty() {
        stream.sentences.push(Sentence { words });
    }
}

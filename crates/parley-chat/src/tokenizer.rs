//! Lower-casing and whitespace tokenization of raw utterances.

/// A raw utterance with its lower-cased form.
///
/// Empty or whitespace-only input yields no tokens and matches nothing
/// downstream.
#[derive(Debug, Clone)]
pub struct Utterance<'a> {
    raw: &'a str,
    lowered: String,
}

impl<'a> Utterance<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lowered: normalize(raw),
        }
    }

    /// The text exactly as received.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Whitespace-delimited tokens of the lower-cased text.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.lowered.split_whitespace()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lowered.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lowered.contains(n))
    }
}

pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

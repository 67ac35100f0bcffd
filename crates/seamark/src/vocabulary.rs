//! Light character codes and the non-conforming tally.

use std::collections::{BTreeSet, HashMap};

/// Valid `seamark:light:character` values, as listed on the OSM wiki.
pub const LIGHT_CHARACTERS: &[&str] = &[
    "F", "Fl", "LFl", "Q", "VQ", "UQ", "Iso", "Oc",
    "IQ", "IVQ", "IUQ", "Mo",
    "Al", "FFl", "FlLFl", "OcFl", "FLFl",
    "Al.Oc", "Al.LFl", "Al.Fl", "Al.Gr", "Al.FFl",
    "Q+LFl", "VQ+LFl", "UQ+LFl",
];

/// Immutable set of valid codes. Membership is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    codes: BTreeSet<String>,
}

impl Vocabulary {
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn light_characters() -> Self {
        Self::from_codes(LIGHT_CHARACTERS.iter().copied())
    }

    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.codes.contains(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::light_characters()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Conforming,
    /// `count` is the running tally for this value, this occurrence included.
    NonConforming { count: usize },
}

/// Vocabulary check plus a tally of every non-conforming value seen.
#[derive(Debug)]
pub struct Classifier {
    vocabulary: Vocabulary,
    // (value, count) in first-encounter order; `index` points into it.
    seen: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Classifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            seen: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn classify(&mut self, value: &str) -> Classification {
        if self.vocabulary.contains(value) {
            return Classification::Conforming;
        }

        let slot = match self.index.get(value) {
            Some(&slot) => slot,
            None => {
                self.seen.push((value.to_owned(), 0));
                self.index.insert(value.to_owned(), self.seen.len() - 1);
                self.seen.len() - 1
            }
        };

        let entry = &mut self.seen[slot];
        entry.1 += 1;
        Classification::NonConforming { count: entry.1 }
    }

    /// Non-conforming values by descending count; ties keep encounter order.
    pub fn report(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = self
            .seen
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// Total non-conforming occurrences tallied.
    pub fn total(&self) -> usize {
        self.seen.iter().map(|(_, count)| count).sum()
    }
}

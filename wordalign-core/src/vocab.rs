use std::num::NonZeroUsize;

use hashbrown::HashMap;
use tracing::debug;

use crate::types::{SentencePair, Token};

/// Dense token -> index mapping for one language.
///
/// Indices run `0..len()` with no gaps and no reserved slot for unknown
/// words: a token that is not in the vocabulary simply has no index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<String, Token>,
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Counts every token in `sentences`, ranks by descending frequency and
    /// keeps the top `freq_cutoff` (or all of them).
    ///
    /// Ties keep first-seen order, so the same corpus always yields the same
    /// mapping.
    pub fn build<'a, I, S>(sentences: I, freq_cutoff: Option<NonZeroUsize>) -> Self
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<[String]> + ?Sized + 'a,
    {
        // (token, count) in first-seen order, plus its position in `counts`
        let mut counts: Vec<(&'a str, usize)> = Vec::new();
        let mut seen: HashMap<&'a str, usize> = HashMap::new();
        for sentence in sentences {
            let sentence: &'a [String] = sentence.as_ref();
            for tok in sentence {
                let slot = *seen.entry(tok.as_str()).or_insert_with(|| {
                    counts.push((tok.as_str(), 0));
                    counts.len() - 1
                });
                counts[slot].1 += 1;
            }
        }

        let n_types = counts.len();
        // stable: equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(cutoff) = freq_cutoff {
            counts.truncate(cutoff.get());
        }
        debug!(types = n_types, kept = counts.len(), "built vocabulary");

        counts.into_iter().map(|(tok, _)| tok).collect()
    }

    #[inline]
    pub fn index_of(&self, token: &str) -> Option<Token> {
        self.index.get(token).copied()
    }

    #[inline]
    pub fn token(&self, index: Token) -> Option<&str> {
        self.tokens.get(index as usize).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `(index, token)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &str)> {
        self.tokens.iter().enumerate().map(|(i, t)| (i as Token, t.as_str()))
    }

    /// Maps every token, or returns `None` if any of them is unknown.
    pub fn encode<S: AsRef<str>>(&self, sentence: &[S]) -> Option<Vec<Token>> {
        sentence.iter().map(|t| self.index_of(t.as_ref())).collect()
    }

    pub fn decode(&self, tokens: &[Token]) -> Option<Vec<&str>> {
        tokens.iter().map(|&t| self.token(t)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    /// Assigns indices in iteration order. Repeated tokens keep their first index.
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut vocab = Vocabulary::default();
        for tok in iter {
            let tok = tok.into();
            if vocab.index.contains_key(&tok) {
                continue;
            }
            vocab.index.insert(tok.clone(), vocab.tokens.len() as Token);
            vocab.tokens.push(tok);
        }
        vocab
    }
}

/// Builds source and target vocabularies independently. The cutoff applies
/// to each language separately.
pub fn build_vocabularies(
    sentence_pairs: &[SentencePair],
    freq_cutoff: Option<NonZeroUsize>,
) -> (Vocabulary, Vocabulary) {
    let source = Vocabulary::build(sentence_pairs.iter().map(|p| &p.source), freq_cutoff);
    let target = Vocabulary::build(sentence_pairs.iter().map(|p| &p.target), freq_cutoff);
    (source, target)
}

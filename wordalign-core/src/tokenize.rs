use tracing::{debug, warn};

use crate::types::{SentencePair, TokenizedSentencePair};
use crate::vocab::Vocabulary;

/// Converts sentence pairs to index arrays.
///
/// A pair is dropped if any token on either side is missing from its
/// vocabulary. Surviving pairs keep their relative order.
pub fn tokenize_sentence_pairs(
    sentence_pairs: &[SentencePair],
    source_vocab: &Vocabulary,
    target_vocab: &Vocabulary,
) -> Vec<TokenizedSentencePair> {
    let out: Vec<TokenizedSentencePair> = sentence_pairs
        .iter()
        .filter_map(|p| tokenize_pair(p, source_vocab, target_vocab))
        .collect();

    let dropped = sentence_pairs.len() - out.len();
    debug!(kept = out.len(), dropped, "tokenized sentence pairs");
    if out.is_empty() && !sentence_pairs.is_empty() {
        warn!(dropped, "every sentence pair had an out-of-vocabulary token");
    }
    out
}

#[inline]
pub fn tokenize_pair(
    pair: &SentencePair,
    source_vocab: &Vocabulary,
    target_vocab: &Vocabulary,
) -> Option<TokenizedSentencePair> {
    let source_tokens = source_vocab.encode(&pair.source)?;
    let target_tokens = target_vocab.encode(&pair.target)?;
    Some(TokenizedSentencePair { source_tokens, target_tokens })
}

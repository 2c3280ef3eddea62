use std::path::PathBuf;

use thiserror::Error;

use crate::types::AlignedPair;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus markup: {0}")]
    Markup(#[from] roxmltree::Error),

    /// `block` is the 0-based index of the annotation block.
    #[error(
        "block {block}: malformed alignment token {token:?}, expected <int>-<int> with both positions at most u32::MAX"
    )]
    MalformedLink { block: usize, token: String },

    #[error(
        "block {block}: alignment {pair:?} outside sentence bounds (source_len={source_len}, target_len={target_len})"
    )]
    PositionOutOfRange {
        block: usize,
        pair: AlignedPair,
        source_len: usize,
        target_len: usize,
    },

    #[error("line {line}: malformed alignment token {token:?}")]
    MalformedMosesLine { line: usize, token: String },

    /// `sentence` is 0-based. Only position 0 fails, when writing 0-based text.
    #[error("sentence {sentence}: alignment {pair:?} has no 0-based form")]
    UnshiftablePosition { sentence: usize, pair: AlignedPair },

    #[error("mismatched sentence counts: reference ({reference}) vs predicted ({predicted})")]
    LengthMismatch { reference: usize, predicted: usize },

    #[error("AER is undefined: no predicted and no sure alignments in the corpus")]
    UndefinedAer,
}

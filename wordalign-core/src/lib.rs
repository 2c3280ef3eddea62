pub mod corpus;
pub mod error;
pub mod metrics;
pub mod moses;
pub mod tokenize;
pub mod types;
pub mod vocab;

pub use corpus::{
    escape_ampersands, parse_corpus, parse_corpus_with, read_corpus, read_corpus_with, CorpusFormat,
};
pub use error::{Error, Result};
pub use metrics::{
    compute_aer, compute_precision, compute_recall, evaluate, AlignmentScores, Counts,
};
pub use moses::{parse_moses, write_moses, IndexBase};
pub use tokenize::tokenize_sentence_pairs;
pub use types::{
    AlignedPair, LabeledAlignment, Position, SentencePair, Token, TokenizedSentencePair,
};
pub use vocab::{build_vocabularies, Vocabulary};

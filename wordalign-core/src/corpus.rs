//! Reader for word-alignment gold corpora.
//!
//! The corpus is an XML-like document. Each child of the root element is
//! one annotated sentence:
//!
//! ```text
//! <sentences>
//!   <s id="1">
//!     <english>The cat sat</english>
//!     <czech>Kočka seděla</czech>
//!     <sure>1-1 2-1 3-2</sure>
//!     <possible></possible>
//!   </s>
//! </sentences>
//! ```
//!
//! Raw files contain bare `&`, which is not valid markup, so every `&` is
//! escaped before the document is parsed.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{split_tokens, AlignedPair, LabeledAlignment, Position, SentencePair};

/// Tag names and validation policy for a corpus.
#[derive(Clone, Debug)]
pub struct CorpusFormat {
    pub source_tag: String,
    pub target_tag: String,
    pub sure_tag: String,
    pub possible_tag: String,
    /// Reject pairs that point past the end of either sentence.
    pub validate_positions: bool,
}

impl Default for CorpusFormat {
    fn default() -> Self {
        CorpusFormat {
            source_tag: "english".into(),
            target_tag: "czech".into(),
            sure_tag: "sure".into(),
            possible_tag: "possible".into(),
            validate_positions: false,
        }
    }
}

/// Replaces every `&` with `&amp;`. Existing entities are escaped too.
pub fn escape_ampersands(raw: &str) -> Cow<'_, str> {
    if raw.contains('&') {
        Cow::Owned(raw.replace('&', "&amp;"))
    } else {
        Cow::Borrowed(raw)
    }
}

pub fn read_corpus(path: impl AsRef<Path>) -> Result<(Vec<SentencePair>, Vec<LabeledAlignment>)> {
    read_corpus_with(path, &CorpusFormat::default())
}

pub fn read_corpus_with(
    path: impl AsRef<Path>,
    format: &CorpusFormat,
) -> Result<(Vec<SentencePair>, Vec<LabeledAlignment>)> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "read corpus");
    parse_corpus_with(&raw, format)
}

pub fn parse_corpus(raw: &str) -> Result<(Vec<SentencePair>, Vec<LabeledAlignment>)> {
    parse_corpus_with(raw, &CorpusFormat::default())
}

/// Parses a whole corpus. Any malformed block fails the whole parse.
pub fn parse_corpus_with(
    raw: &str,
    format: &CorpusFormat,
) -> Result<(Vec<SentencePair>, Vec<LabeledAlignment>)> {
    let escaped = escape_ampersands(raw);
    let mut opts = ParsingOptions::default();
    opts.allow_dtd = true;
    let doc = Document::parse_with_options(&escaped, opts)?;

    let mut sentence_pairs = Vec::new();
    let mut alignments = Vec::new();
    for (block, node) in doc.root_element().children().filter(Node::is_element).enumerate() {
        let (pair, alignment) = parse_block(block, node, format)?;
        sentence_pairs.push(pair);
        alignments.push(alignment);
    }

    debug!(blocks = sentence_pairs.len(), "parsed corpus");
    Ok((sentence_pairs, alignments))
}

fn parse_block(
    block: usize,
    node: Node<'_, '_>,
    format: &CorpusFormat,
) -> Result<(SentencePair, LabeledAlignment)> {
    let mut source = Vec::new();
    let mut target = Vec::new();
    let mut sure = BTreeSet::new();
    let mut possible = BTreeSet::new();

    for child in node.children().filter(Node::is_element) {
        let name = child.tag_name().name();
        let text = segment_text(child);
        if name == format.source_tag {
            source = split_tokens(&text);
        } else if name == format.target_tag {
            target = split_tokens(&text);
        } else if name == format.sure_tag {
            sure = parse_links(block, &text)?;
        } else if name == format.possible_tag {
            possible = parse_links(block, &text)?;
        }
    }

    let alignment = LabeledAlignment { sure, possible };
    if format.validate_positions {
        check_positions(block, &alignment, source.len(), target.len())?;
    }
    Ok((SentencePair { source, target }, alignment))
}

/// All text inside a segment. Comments and nested tags are skipped, and the
/// text on either side of them is joined.
fn segment_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

/// Parses a whitespace-separated list of `i-j` tokens.
pub fn parse_links(block: usize, text: &str) -> Result<BTreeSet<AlignedPair>> {
    text.split_whitespace()
        .map(|tok| {
            parse_link(tok).ok_or_else(|| Error::MalformedLink {
                block,
                token: tok.to_owned(),
            })
        })
        .collect()
}

/// `"3-4"` -> `(3, 4)`. Both halves must be unsigned integers that fit in
/// a [`Position`].
pub fn parse_link(tok: &str) -> Option<AlignedPair> {
    let (i, j) = tok.split_once('-')?;
    let i: Position = i.parse().ok()?;
    let j: Position = j.parse().ok()?;
    Some((i, j))
}

fn check_positions(
    block: usize,
    alignment: &LabeledAlignment,
    source_len: usize,
    target_len: usize,
) -> Result<()> {
    let in_range = |p: Position, len: usize| p >= 1 && (p as usize) <= len;
    match alignment
        .pairs()
        .find(|&&(i, j)| !in_range(i, source_len) || !in_range(j, target_len))
    {
        Some(&pair) => Err(Error::PositionOutOfRange {
            block,
            pair,
            source_len,
            target_len,
        }),
        None => Ok(()),
    }
}

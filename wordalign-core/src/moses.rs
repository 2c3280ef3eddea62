//! Moses-style alignment text: one sentence per line, `i-j` links separated
//! by spaces. Aligners usually write these 0-based; gold alignments here are
//! 1-based, so reading shifts as needed.

use tracing::debug;

use crate::corpus::parse_link;
use crate::error::{Error, Result};
use crate::types::{AlignedPair, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexBase {
    #[default]
    Zero,
    One,
}

impl IndexBase {
    #[inline]
    fn offset(self) -> Position {
        match self {
            IndexBase::Zero => 1,
            IndexBase::One => 0,
        }
    }
}

/// Reads one alignment per line and returns 1-based pairs. Blank lines are
/// sentences with no links.
pub fn parse_moses(text: &str, base: IndexBase) -> Result<Vec<Vec<AlignedPair>>> {
    let offset = base.offset();
    let mut out = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let mut links = Vec::new();
        for tok in line.split_whitespace() {
            let bad = || Error::MalformedMosesLine { line: n + 1, token: tok.to_owned() };
            let (i, j) = parse_link(tok).ok_or_else(bad)?;
            let i = i.checked_add(offset).ok_or_else(bad)?;
            let j = j.checked_add(offset).ok_or_else(bad)?;
            links.push((i, j));
        }
        out.push(links);
    }
    debug!(sentences = out.len(), "read moses alignments");
    Ok(out)
}

/// Writes 1-based pairs in the given base, sorted and deduplicated within
/// each line. A position 0 cannot be written 0-based and is an error.
pub fn write_moses<P: AsRef<[AlignedPair]>>(alignments: &[P], base: IndexBase) -> Result<String> {
    let offset = base.offset();
    let mut out = String::new();
    for (n, links) in alignments.iter().enumerate() {
        let mut links = links.as_ref().to_vec();
        links.sort_unstable();
        links.dedup();
        for (k, &(i, j)) in links.iter().enumerate() {
            let unshiftable = || Error::UnshiftablePosition { sentence: n, pair: (i, j) };
            let i = i.checked_sub(offset).ok_or_else(unshiftable)?;
            let j = j.checked_sub(offset).ok_or_else(unshiftable)?;
            if k > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{i}-{j}"));
        }
        out.push('\n');
    }
    Ok(out)
}

use std::collections::BTreeSet;

/// Index into a [`Vocabulary`](crate::vocab::Vocabulary).
pub type Token = u32;
/// 1-based word position inside a sentence. Positions above `u32::MAX` are
/// rejected when parsed.
pub type Position = u32;
/// `(source_pos, target_pos)`, both 1-based.
pub type AlignedPair = (Position, Position);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentencePair {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl SentencePair {
    /// Splits both sides on whitespace.
    pub fn from_text(source: &str, target: &str) -> Self {
        SentencePair {
            source: split_tokens(source),
            target: split_tokens(target),
        }
    }
}

/// Human alignment judgments for one sentence.
///
/// `possible` is meant to be a superset of `sure`, but annotated data does
/// not always respect that and nothing here enforces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabeledAlignment {
    pub sure: BTreeSet<AlignedPair>,
    pub possible: BTreeSet<AlignedPair>,
}

impl LabeledAlignment {
    pub fn new<S, P>(sure: S, possible: P) -> Self
    where
        S: IntoIterator<Item = AlignedPair>,
        P: IntoIterator<Item = AlignedPair>,
    {
        LabeledAlignment {
            sure: sure.into_iter().collect(),
            possible: possible.into_iter().collect(),
        }
    }

    /// `sure ∪ possible`, the pairs a prediction may hit for precision.
    pub fn allowed(&self) -> BTreeSet<AlignedPair> {
        self.sure.union(&self.possible).copied().collect()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &AlignedPair> {
        self.sure.iter().chain(self.possible.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizedSentencePair {
    pub source_tokens: Vec<Token>,
    pub target_tokens: Vec<Token>,
}

#[inline]
pub(crate) fn split_tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_is_union_even_when_sure_not_in_possible() {
        let a = LabeledAlignment::new([(1, 1), (3, 2)], [(1, 1), (2, 2)]);
        let allowed: Vec<_> = a.allowed().into_iter().collect();
        assert_eq!(allowed, vec![(1, 1), (2, 2), (3, 2)]);
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let a = LabeledAlignment::new([(1, 1), (1, 1)], []);
        assert_eq!(a.sure.len(), 1);
        assert!(a.possible.is_empty());
    }

    #[test]
    fn from_text_splits_on_any_whitespace() {
        let p = SentencePair::from_text("  the\tcat \n", "kočka");
        assert_eq!(p.source, vec!["the", "cat"]);
        assert_eq!(p.target, vec!["kočka"]);
    }
}

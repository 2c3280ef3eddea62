//! Precision, recall and alignment error rate against gold alignments.
//!
//! Predictions are treated as sets per sentence, so repeated pairs count
//! once. Precision matches against `sure ∪ possible` and recall against
//! `sure` only:
//!
//! ```text
//! AER = 1 - (|A ∩ P| + |A ∩ S|) / (|A| + |S|)
//! ```
//!
//! with `A` the predicted pairs, `S` the sure pairs and `P` the union of
//! sure and possible.

use hashbrown::HashSet;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{AlignedPair, LabeledAlignment};

/// Numerator and denominator summed over a corpus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub matched: usize,
    pub total: usize,
}

impl Counts {
    /// `None` when `total` is zero.
    pub fn ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.matched as f64 / self.total as f64)
    }
}

impl From<Counts> for (usize, usize) {
    fn from(c: Counts) -> Self {
        (c.matched, c.total)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignmentScores {
    pub precision: Counts,
    pub recall: Counts,
    pub aer: f64,
}

fn check_lengths<P>(reference: &[LabeledAlignment], predicted: &[P]) -> Result<()> {
    if reference.len() != predicted.len() {
        return Err(Error::LengthMismatch {
            reference: reference.len(),
            predicted: predicted.len(),
        });
    }
    Ok(())
}

#[inline]
fn as_set(pairs: &[AlignedPair]) -> HashSet<AlignedPair> {
    pairs.iter().copied().collect()
}

/// `(|predicted ∩ (sure ∪ possible)|, |predicted|)` summed over sentences.
pub fn compute_precision<P>(reference: &[LabeledAlignment], predicted: &[P]) -> Result<Counts>
where
    P: AsRef<[AlignedPair]>,
{
    check_lengths(reference, predicted)?;
    let mut counts = Counts::default();
    for (gold, pred) in reference.iter().zip(predicted) {
        let pred = as_set(pred.as_ref());
        let allowed = gold.allowed();
        counts.total += pred.len();
        counts.matched += pred.iter().filter(|p| allowed.contains(*p)).count();
    }
    debug!(matched = counts.matched, predicted = counts.total, "precision");
    Ok(counts)
}

/// `(|predicted ∩ sure|, |sure|)` summed over sentences.
pub fn compute_recall<P>(reference: &[LabeledAlignment], predicted: &[P]) -> Result<Counts>
where
    P: AsRef<[AlignedPair]>,
{
    check_lengths(reference, predicted)?;
    let mut counts = Counts::default();
    for (gold, pred) in reference.iter().zip(predicted) {
        let pred = as_set(pred.as_ref());
        counts.total += gold.sure.len();
        counts.matched += gold.sure.iter().filter(|p| pred.contains(*p)).count();
    }
    debug!(matched = counts.matched, sure = counts.total, "recall");
    Ok(counts)
}

pub fn compute_aer<P>(reference: &[LabeledAlignment], predicted: &[P]) -> Result<f64>
where
    P: AsRef<[AlignedPair]>,
{
    let precision = compute_precision(reference, predicted)?;
    let recall = compute_recall(reference, predicted)?;
    aer_from_counts(precision, recall)
}

/// Computes all three metrics.
pub fn evaluate<P>(reference: &[LabeledAlignment], predicted: &[P]) -> Result<AlignmentScores>
where
    P: AsRef<[AlignedPair]>,
{
    let precision = compute_precision(reference, predicted)?;
    let recall = compute_recall(reference, predicted)?;
    let aer = aer_from_counts(precision, recall)?;
    Ok(AlignmentScores { precision, recall, aer })
}

fn aer_from_counts(precision: Counts, recall: Counts) -> Result<f64> {
    let denom = precision.total + recall.total;
    if denom == 0 {
        warn!("no predicted and no sure alignments, AER undefined");
        return Err(Error::UndefinedAer);
    }
    Ok(1.0 - (precision.matched + recall.matched) as f64 / denom as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold(sure: &[AlignedPair], possible: &[AlignedPair]) -> LabeledAlignment {
        LabeledAlignment::new(sure.iter().copied(), possible.iter().copied())
    }

    #[test]
    fn perfect_prediction() {
        let reference = vec![gold(&[(1, 1)], &[(1, 1), (2, 2)])];
        let predicted: Vec<Vec<AlignedPair>> = vec![vec![(1, 1), (2, 2)]];
        let p = compute_precision(&reference, &predicted).unwrap();
        let r = compute_recall(&reference, &predicted).unwrap();
        assert_eq!(<(usize, usize)>::from(p), (2, 2));
        assert_eq!(<(usize, usize)>::from(r), (1, 1));
        assert_eq!(compute_aer(&reference, &predicted).unwrap(), 0.0);
    }

    #[test]
    fn empty_prediction_counts_missed_sure() {
        let reference = vec![
            gold(&[(1, 1)], &[(1, 1), (2, 2)]),
            gold(&[(1, 2), (2, 1)], &[]),
        ];
        let predicted: Vec<Vec<AlignedPair>> = vec![vec![(1, 1), (2, 2)], vec![]];
        let r = compute_recall(&reference, &predicted).unwrap();
        assert_eq!(r, Counts { matched: 1, total: 3 });
        let p = compute_precision(&reference, &predicted).unwrap();
        assert_eq!(p, Counts { matched: 2, total: 2 });
        // 1 - (2 + 1) / (2 + 3)
        let aer = compute_aer(&reference, &predicted).unwrap();
        assert!((aer - 0.4).abs() < 1e-12);
    }

    #[test]
    fn duplicate_predictions_collapse() {
        let reference = vec![gold(&[(1, 1)], &[])];
        let predicted: Vec<Vec<AlignedPair>> = vec![vec![(1, 1), (1, 1), (1, 1)]];
        let p = compute_precision(&reference, &predicted).unwrap();
        assert_eq!(p, Counts { matched: 1, total: 1 });
        assert_eq!(compute_aer(&reference, &predicted).unwrap(), 0.0);
    }

    #[test]
    fn sure_outside_possible_still_counts_for_precision() {
        // (3, 3) is sure but not listed as possible
        let reference = vec![gold(&[(3, 3)], &[(1, 1)])];
        let predicted: Vec<Vec<AlignedPair>> = vec![vec![(3, 3), (1, 1), (2, 5)]];
        let p = compute_precision(&reference, &predicted).unwrap();
        assert_eq!(p, Counts { matched: 2, total: 3 });
        let r = compute_recall(&reference, &predicted).unwrap();
        assert_eq!(r, Counts { matched: 1, total: 1 });
    }

    #[test]
    fn length_mismatch_is_reported() {
        let reference = vec![gold(&[(1, 1)], &[])];
        let predicted: Vec<Vec<AlignedPair>> = vec![vec![], vec![]];
        for res in [
            compute_precision(&reference, &predicted).map(|_| ()),
            compute_recall(&reference, &predicted).map(|_| ()),
            compute_aer(&reference, &predicted).map(|_| ()),
        ] {
            assert!(matches!(
                res,
                Err(Error::LengthMismatch { reference: 1, predicted: 2 })
            ));
        }
    }

    #[test]
    fn aer_undefined_without_any_links() {
        let reference = vec![gold(&[], &[(1, 1)]), gold(&[], &[])];
        let predicted: Vec<Vec<AlignedPair>> = vec![vec![], vec![]];
        assert!(matches!(compute_aer(&reference, &predicted), Err(Error::UndefinedAer)));
        assert!(matches!(evaluate(&reference, &predicted), Err(Error::UndefinedAer)));
        // precision/recall themselves are still defined as counts
        let p = compute_precision(&reference, &predicted).unwrap();
        assert_eq!(p.ratio(), None);
    }

    #[test]
    fn metrics_stay_in_bounds() {
        let reference = vec![
            gold(&[(1, 1), (2, 2)], &[(2, 3)]),
            gold(&[(1, 2)], &[(1, 2), (2, 1), (3, 3)]),
            gold(&[], &[(4, 4)]),
        ];
        let predicted: Vec<Vec<AlignedPair>> = vec![
            vec![(1, 1), (2, 3), (3, 3)],
            vec![(2, 1), (2, 2)],
            vec![(4, 4), (5, 5)],
        ];
        let s = evaluate(&reference, &predicted).unwrap();
        assert!(s.precision.matched <= s.precision.total);
        assert!(s.recall.matched <= s.recall.total);
        assert!((0.0..=1.0).contains(&s.aer));
        assert_eq!(s.precision, Counts { matched: 4, total: 7 });
        assert_eq!(s.recall, Counts { matched: 1, total: 3 });
        // 1 - 5 / 10
        assert!((s.aer - 0.5).abs() < 1e-12);
        assert!((s.recall.ratio().unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn accepts_slices() {
        let reference = [gold(&[(1, 1)], &[])];
        let predicted: [&[AlignedPair]; 1] = [&[(1, 1)]];
        assert_eq!(compute_aer(&reference, &predicted).unwrap(), 0.0);
    }
}

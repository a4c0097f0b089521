//! Insight summarizer: frequency statistics over annotated records.

use serde::{Deserialize, Serialize};

use crate::domain::{AnnotatedRecord, Behavior};
use crate::error::{AnalysisError, InputError};

/// Occurrences of one behavior label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorFrequency {
    pub behavior: Behavior,
    pub count: usize,
    /// `count / total`, in `[0, 1]`.
    pub fraction: f64,
}

/// Occurrences of one price/volume combination label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationFrequency {
    pub combination: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    /// One entry per behavior, in [`Behavior::ALL`] order, including zeros.
    pub behaviors: Vec<BehaviorFrequency>,
    /// Most frequent behavior; ties go to the label seen first.
    pub dominant: Behavior,
    pub latest_behavior: Behavior,
    pub latest_combination: String,
    /// Sorted by count descending; ties keep first-appearance order.
    pub combinations: Vec<CombinationFrequency>,
}

impl AnalysisSummary {
    pub fn count(&self, behavior: Behavior) -> usize {
        self.frequency(behavior).map_or(0, |f| f.count)
    }

    pub fn fraction(&self, behavior: Behavior) -> f64 {
        self.frequency(behavior).map_or(0.0, |f| f.fraction)
    }

    fn frequency(&self, behavior: Behavior) -> Option<&BehaviorFrequency> {
        self.behaviors.iter().find(|f| f.behavior == behavior)
    }

    /// True when `behaviors` has exactly one entry per label in
    /// [`Behavior::ALL`] order and the counts add up to `total`.
    pub fn has_canonical_layout(&self) -> bool {
        self.behaviors.len() == Behavior::ALL.len()
            && self
                .behaviors
                .iter()
                .zip(Behavior::ALL)
                .all(|(f, b)| f.behavior == b)
            && self.behaviors.iter().map(|f| f.count).sum::<usize>() == self.total
    }

    pub fn buying_pressure(&self) -> f64 {
        self.fraction(Behavior::BuyingPressure)
    }

    pub fn selling_pressure(&self) -> f64 {
        self.fraction(Behavior::SellingPressure)
    }

    pub fn stable_market(&self) -> f64 {
        self.fraction(Behavior::StableMarket)
    }
}

/// Summarize a non-empty record sequence.
pub fn summarize(records: &[AnnotatedRecord]) -> Result<AnalysisSummary, AnalysisError> {
    let Some(latest) = records.last() else {
        return Err(InputError::EmptySeries.into());
    };
    let total = records.len();

    // Counts plus the index of each label's first appearance.
    let mut counts = [0usize; 9];
    let mut first_seen = [usize::MAX; 9];
    let mut combinations: Vec<CombinationFrequency> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let slot = record.behavior.index();
        counts[slot] += 1;
        if first_seen[slot] == usize::MAX {
            first_seen[slot] = i;
        }

        match combinations
            .iter_mut()
            .find(|c| c.combination == record.combination)
        {
            Some(entry) => entry.count += 1,
            None => combinations.push(CombinationFrequency {
                combination: record.combination.clone(),
                count: 1,
            }),
        }
    }

    // Highest count wins; on a tie the smaller first-seen index wins.
    let dominant = Behavior::ALL
        .iter()
        .copied()
        .filter(|b| counts[b.index()] > 0)
        .min_by_key(|b| (std::cmp::Reverse(counts[b.index()]), first_seen[b.index()]))
        .unwrap_or(latest.behavior);

    let behaviors = Behavior::ALL
        .iter()
        .map(|&behavior| {
            let count = counts[behavior.index()];
            BehaviorFrequency {
                behavior,
                count,
                fraction: count as f64 / total as f64,
            }
        })
        .collect();

    // Stable sort keeps first-appearance order among equal counts.
    combinations.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(AnalysisSummary {
        total,
        behaviors,
        dominant,
        latest_behavior: latest.behavior,
        latest_combination: latest.combination.clone(),
        combinations,
    })
}

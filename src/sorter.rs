//! Stable timestamp sort of a record list, with before/after statistics.
//!
//! Sorting is split in two steps so a dry run never has to touch the
//! document: [`plan_sort`] borrows the records and computes the permutation
//! plus [`SortStats`], and [`SortPlan::apply`] reorders an owned list.

use serde_json::Value;
use tracing::debug;

use crate::sort_key::SortKey;

/// Statistics for one sorted list.
///
/// Timestamp fields hold the raw field value of the first/last record, or
/// `None` when the list is empty or the record lacks the field.
#[derive(Debug, Clone, PartialEq)]
pub struct SortStats {
    /// Report label (`top-level-list` or the list key).
    pub label: String,
    pub count: usize,
    /// At least one record moved from its original position.
    pub changed: bool,
    pub first_before: Option<Value>,
    pub first_after: Option<Value>,
    pub last_before: Option<Value>,
    pub last_after: Option<Value>,
    /// Adjacent pairs in the original order whose key decreases.
    pub out_of_order: usize,
    pub count_before: usize,
    pub count_after: usize,
}

impl SortStats {
    fn empty(label: &str) -> Self {
        Self {
            label: label.to_string(),
            count: 0,
            changed: false,
            first_before: None,
            first_after: None,
            last_before: None,
            last_after: None,
            out_of_order: 0,
            count_before: 0,
            count_after: 0,
        }
    }
}

/// A computed reordering of a record list.
#[derive(Debug, Clone)]
pub struct SortPlan {
    /// Statistics describing the list before and after the sort.
    pub stats: SortStats,
    /// `order[i]` is the original index of the record that lands at `i`.
    order: Vec<usize>,
}

impl SortPlan {
    /// Original indices in sorted order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Reorder `records` according to this plan.
    ///
    /// `records` must be the list the plan was computed from. A plan that
    /// reports no change leaves the list as is.
    ///
    /// # Panics
    ///
    /// In debug builds, when `records` has a different length than the
    /// planned list. Release builds leave such a list untouched.
    pub fn apply(&self, records: &mut Vec<Value>) {
        debug_assert_eq!(
            records.len(),
            self.order.len(),
            "sort plan applied to a list of a different length"
        );
        if !self.stats.changed || records.len() != self.order.len() {
            return;
        }
        let mut slots: Vec<Option<Value>> = std::mem::take(records).into_iter().map(Some).collect();
        *records = self
            .order
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
    }
}

/// Compute the stable timestamp order of `records` without moving them.
pub fn plan_sort(records: &[Value], label: &str, timestamp_key: &str) -> SortPlan {
    if records.is_empty() {
        return SortPlan {
            stats: SortStats::empty(label),
            order: Vec::new(),
        };
    }

    let keys: Vec<SortKey> = records
        .iter()
        .map(|record| SortKey::for_record(record, timestamp_key))
        .collect();

    let out_of_order = keys.windows(2).filter(|pair| pair[1] < pair[0]).count();

    // `sort_by` is stable: equal keys keep their input order.
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

    let changed = order.iter().enumerate().any(|(pos, &orig)| pos != orig);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut tiers = [0usize; 3];
        for key in &keys {
            tiers[usize::from(key.tier())] += 1;
        }
        debug!(
            label,
            count = records.len(),
            instants = tiers[0],
            texts = tiers[1],
            missing = tiers[2],
            out_of_order,
            changed,
            "planned sort"
        );
    }

    let ts = |idx: usize| records[idx].get(timestamp_key).cloned();
    let last = records.len() - 1;

    let stats = SortStats {
        label: label.to_string(),
        count: records.len(),
        changed,
        first_before: ts(0),
        first_after: ts(order[0]),
        last_before: ts(last),
        last_after: ts(order[last]),
        out_of_order,
        count_before: records.len(),
        count_after: order.len(),
    };

    SortPlan { stats, order }
}

/// Sort an owned record list by timestamp, returning it with its statistics.
pub fn sort_records(mut records: Vec<Value>, label: &str, timestamp_key: &str) -> (Vec<Value>, SortStats) {
    let plan = plan_sort(&records, label, timestamp_key);
    plan.apply(&mut records);
    (records, plan.stats)
}

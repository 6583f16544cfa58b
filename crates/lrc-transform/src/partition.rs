//! Splits the sorted output into contiguous, size-bounded partitions.

use std::ops::Range;

/// One output partition: rows `start..end` of the sorted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionPlan {
    /// 1-based position, used in the partition file name.
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl PartitionPlan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of partitions needed for `total` rows.
pub fn partition_count(total: usize, chunk_size: usize) -> usize {
    total.div_ceil(chunk_size.max(1))
}

/// Partition `i` (0-based) covers `[i * chunk_size, min((i + 1) * chunk_size, total))`.
///
/// Zero rows give zero partitions. A `chunk_size` of zero is rejected by
/// option validation upstream and is read as one here.
pub fn plan_partitions(total: usize, chunk_size: usize) -> Vec<PartitionPlan> {
    let chunk_size = chunk_size.max(1);
    (0..partition_count(total, chunk_size))
        .map(|i| PartitionPlan {
            index: i + 1,
            start: i * chunk_size,
            end: ((i + 1) * chunk_size).min(total),
        })
        .collect()
}

/// Pairs each partition plan with its slice of `records`.
pub fn partition_records<T>(records: &[T], chunk_size: usize) -> Vec<(PartitionPlan, &[T])> {
    plan_partitions(records.len(), chunk_size)
        .into_iter()
        .map(|plan| (plan, &records[plan.range()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn five_rows_in_chunks_of_two() {
        let plans = plan_partitions(5, 2);
        let sizes: Vec<usize> = plans.iter().map(PartitionPlan::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(plans[0].index, 1);
        assert_eq!(plans[2].range(), 4..5);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let plans = plan_partitions(4, 2);
        assert_eq!(plans.len(), 2);
        assert!(plans.iter().all(|plan| !plan.is_empty()));
    }

    #[test]
    fn no_rows_no_partitions() {
        assert!(plan_partitions(0, 50_000).is_empty());
        assert_eq!(partition_count(0, 10), 0);
    }

    #[test]
    fn default_chunk_holds_everything() {
        let plans = plan_partitions(49_999, 50_000);
        assert_eq!(plans, vec![PartitionPlan { index: 1, start: 0, end: 49_999 }]);
    }

    #[test]
    fn slices_follow_plans() {
        let records = vec!['a', 'b', 'c'];
        let parts = partition_records(&records, 2);
        assert_eq!(parts[0].1, &['a', 'b']);
        assert_eq!(parts[1].1, &['c']);
    }

    proptest! {
        #[test]
        fn partitions_are_contiguous_and_exhaustive(total in 0usize..5_000, chunk in 1usize..700) {
            let plans = plan_partitions(total, chunk);
            prop_assert_eq!(plans.len(), partition_count(total, chunk));
            let mut next = 0;
            for (position, plan) in plans.iter().enumerate() {
                prop_assert_eq!(plan.index, position + 1);
                prop_assert_eq!(plan.start, next);
                prop_assert!(!plan.is_empty());
                prop_assert!(plan.len() <= chunk);
                next = plan.end;
            }
            prop_assert_eq!(next, total);
        }
    }
}

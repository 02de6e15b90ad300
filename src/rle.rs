//! Run length encoding of topology counts and group membership.

/// A run of a repeated value: `(value, repeat)`.
pub type Run<T> = (T, usize);

/// Collapse maximal runs of equal consecutive values.
///
/// # Example
/// ```rust
/// # use hougeo::*;
/// assert_eq!(encode_counts(&[3, 3, 4, 3, 3]), vec![(3, 2), (4, 1), (3, 2)]);
/// ```
pub fn encode_counts<T: PartialEq + Copy>(counts: &[T]) -> Vec<Run<T>> {
    let mut runs: Vec<Run<T>> = Vec::new();

    for &c in counts {
        match runs.last_mut() {
            Some((v, n)) if *v == c => *n += 1,
            _ => runs.push((c, 1)),
        }
    }

    runs
}

/// Expand runs back into the values.
pub fn decode_counts<T: Copy>(runs: &[Run<T>]) -> Vec<T> {
    runs.iter()
        .flat_map(|&(v, n)| std::iter::repeat(v).take(n))
        .collect()
}

/// Flatten runs into the alternating `[value, repeat, value, repeat, ...]` form.
pub fn flatten_runs(runs: &[Run<usize>]) -> Vec<usize> {
    runs.iter().flat_map(|&(v, n)| [v, n]).collect()
}

/// A boolean run length selection over the primitive range, `(length, member)`.
pub type Selection = Vec<(usize, bool)>;

/// Build one membership selection per group.
///
/// `sizes` are the group sizes in primitive order, where groups are consecutive and together
/// cover every primitive. Group `i` selects `[before, false, size, true, after, false]` where
/// zero length segments are left out.
///
/// # Example
/// ```rust
/// # use hougeo::*;
/// let s = group_selections(&[10, 20, 70]);
/// assert_eq!(s[0], vec![(10, true), (90, false)]);
/// assert_eq!(s[1], vec![(10, false), (20, true), (70, false)]);
/// assert_eq!(s[2], vec![(30, false), (70, true)]);
/// ```
pub fn group_selections(sizes: &[usize]) -> Vec<Selection> {
    let total: usize = sizes.iter().sum();

    let mut before = 0;
    sizes
        .iter()
        .map(|&size| {
            let after = total - before - size;
            let sel = selection([(before, false), (size, true), (after, false)]);
            before += size;
            sel
        })
        .collect()
}

fn selection(segments: impl IntoIterator<Item = (usize, bool)>) -> Selection {
    let mut sel: Selection = Vec::new();
    for (len, flag) in segments.into_iter().filter(|&(len, _)| len > 0) {
        // an empty group leaves two `false` runs side by side
        match sel.last_mut() {
            Some((n, f)) if *f == flag => *n += len,
            _ => sel.push((len, flag)),
        }
    }
    sel
}

/// Expand a selection into one membership flag per primitive.
pub fn decode_selection(sel: &[(usize, bool)]) -> Vec<bool> {
    decode_counts(&sel.iter().map(|&(n, f)| (f, n)).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    #[test]
    fn count_runs() {
        assert_eq!(encode_counts::<usize>(&[]), vec![]);
        assert_eq!(encode_counts(&[4]), vec![(4, 1)]);
        assert_eq!(
            encode_counts(&[3, 3, 4, 3, 3]),
            vec![(3, 2), (4, 1), (3, 2)]
        );
        assert_eq!(flatten_runs(&encode_counts(&[3, 3, 4, 3, 3])), vec![3, 2, 4, 1, 3, 2]);
    }

    #[quickcheck]
    fn count_runs_round_trip(counts: Vec<u8>) -> bool {
        decode_counts(&encode_counts(&counts)) == counts
    }

    #[quickcheck]
    fn count_runs_are_maximal(counts: Vec<u8>) -> bool {
        let runs = encode_counts(&counts);
        runs.windows(2).all(|w| w[0].0 != w[1].0) && runs.iter().all(|r| r.1 > 0)
    }

    #[test]
    fn single_group() {
        assert_eq!(group_selections(&[5]), vec![vec![(5, true)]]);
        assert!(group_selections(&[]).is_empty());
    }

    #[test]
    fn empty_groups_do_not_break_alternation() {
        let s = group_selections(&[2, 0, 3]);
        assert_eq!(s[0], vec![(2, true), (3, false)]);
        assert_eq!(s[1], vec![(5, false)]);
        assert_eq!(s[2], vec![(2, false), (3, true)]);
    }

    #[quickcheck]
    fn groups_partition_range(sizes: Vec<u8>) -> TestResult {
        let sizes = sizes.into_iter().map(usize::from).collect::<Vec<_>>();
        let total: usize = sizes.iter().sum();
        if total == 0 {
            return TestResult::discard();
        }

        let sels = group_selections(&sizes);
        let flags = sels.iter().map(|s| decode_selection(s)).collect::<Vec<_>>();

        let covers = flags.iter().all(|f| f.len() == total);
        let once = (0..total).all(|i| flags.iter().filter(|f| f[i]).count() == 1);
        let sized = sels.iter().zip(&sizes).all(|(s, &size)| {
            s.iter().filter(|x| x.1).map(|x| x.0).sum::<usize>() == size
                && s.iter().filter(|x| x.1).count() <= 1
        });
        let alternates = sels.iter().all(|s| s.windows(2).all(|w| w[0].1 != w[1].1));

        TestResult::from_bool(covers && once && sized && alternates)
    }
}

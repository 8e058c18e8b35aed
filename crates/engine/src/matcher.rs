//! Approximate matching of canonical strings by edit distance.

/// Levenshtein distance between two strings, computed over Unicode scalar
/// values with the standard two-row dynamic program.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Pick the best existing group for `needle` among candidate canonical
/// strings.
///
/// Returns the index of the minimum-distance candidate within
/// `max_distance`; ties go to the lowest (earliest-created) index. `None`
/// means nothing is close enough and the caller starts a new group. A
/// `max_distance` of zero degenerates to exact matching.
pub(crate) fn best_match<'a, I>(needle: &str, candidates: I, max_distance: usize) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    if max_distance == 0 {
        return candidates.into_iter().position(|c| c == needle);
    }

    let needle_len = needle.chars().count();
    let mut best: Option<(usize, usize)> = None;
    for (idx, candidate) in candidates.into_iter().enumerate() {
        // Distance is bounded below by the length difference.
        if candidate.chars().count().abs_diff(needle_len) > max_distance {
            continue;
        }
        let dist = levenshtein(needle, candidate);
        if dist <= max_distance && best.is_none_or(|(_, d)| dist < d) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_of_equal_strings_is_zero() {
        assert_eq!(levenshtein("read timeout", "read timeout"), 0);
    }

    #[test]
    fn distance_counts_edits() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("read timeout", "read timeou"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn distance_works_on_multibyte_text() {
        assert_eq!(levenshtein("naïve", "naive"), 1);
    }

    #[test]
    fn best_match_picks_minimum_distance() {
        let candidates = ["connection reset", "read timeout", "read timeou"];
        assert_eq!(best_match("read timeout", candidates, 3), Some(1));
    }

    #[test]
    fn best_match_breaks_ties_toward_earliest_candidate() {
        // Both candidates are one edit away.
        let candidates = ["read timeoux", "read timeouy"];
        assert_eq!(best_match("read timeout", candidates, 3), Some(0));
    }

    #[test]
    fn best_match_rejects_everything_beyond_threshold() {
        let candidates = ["completely different text"];
        assert_eq!(best_match("read timeout", candidates, 3), None);
    }

    #[test]
    fn zero_threshold_is_exact_matching() {
        let candidates = ["read timeou", "read timeout"];
        assert_eq!(best_match("read timeout", candidates, 0), Some(1));
        assert_eq!(best_match("read timeoutX", candidates, 0), None);
    }
}

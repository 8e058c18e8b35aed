//! Sparkline formatting for trend buckets.

/// Block elements, lowest to highest.
const TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render bucket counts as one block character per bucket, scaled against
/// the slice maximum.
///
/// A zero bucket renders as a space so quiet intervals read as gaps; any
/// nonzero count shows at least the lowest block. Callers pass counts
/// oldest first so the newest bucket lands on the right.
#[must_use]
pub fn spark(counts: &[u64]) -> String {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return " ".repeat(counts.len());
    }
    counts
        .iter()
        .map(|&count| {
            if count == 0 {
                ' '
            } else {
                let level = (count * TICKS.len() as u64).div_ceil(max);
                TICKS[(level.clamp(1, TICKS.len() as u64) - 1) as usize]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_slice_renders_empty() {
        assert_eq!(spark(&[]), "");
    }

    #[test]
    fn zeroes_render_as_gaps() {
        assert_eq!(spark(&[0, 0, 0]), "   ");
    }

    #[test]
    fn maximum_renders_as_full_block() {
        assert_eq!(spark(&[4]), "█");
    }

    #[test]
    fn small_nonzero_counts_stay_visible() {
        assert_eq!(spark(&[1, 0, 100]), "▁ █");
    }

    #[test]
    fn levels_scale_with_the_maximum() {
        assert_eq!(spark(&[1, 2, 3, 4]), "▂▄▆█");
        assert_eq!(spark(&[1, 8]), "▁█");
    }
}

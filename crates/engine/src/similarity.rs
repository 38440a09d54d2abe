use std::collections::HashMap;

/// Similarity of two strings in `[0.0, 1.0]`, computed as `2 * M / T` where
/// `M` is the total length of the aligned matching blocks found by recursive
/// longest-common-contiguous-block matching and `T` is the combined character
/// length. Identical strings score 1.0, fully disjoint strings 0.0; two empty
/// strings count as identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_block_len(&a, &b) as f64 / total as f64
}

/// Total length of all matching blocks: the longest common contiguous block
/// splits both strings, and the regions to either side are matched
/// recursively (iterative worklist, same result).
fn matched_block_len(a: &[char], b: &[char]) -> usize {
    let mut regions = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0usize;
    while let Some((a_lo, a_hi, b_lo, b_hi)) = regions.pop() {
        let (a_start, b_start, len) = longest_block(a, b, a_lo, a_hi, b_lo, b_hi);
        if len == 0 {
            continue;
        }
        matched += len;
        if a_lo < a_start && b_lo < b_start {
            regions.push((a_lo, a_start, b_lo, b_start));
        }
        if a_start + len < a_hi && b_start + len < b_hi {
            regions.push((a_start + len, a_hi, b_start + len, b_hi));
        }
    }
    matched
}

/// Longest block with `a[a_start..a_start + len] == b[b_start..b_start + len]`
/// inside the given windows. Ties resolve to the earliest start in `a`, then
/// the earliest in `b`, which keeps scoring deterministic.
fn longest_block(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let mut best = (a_lo, b_lo, 0usize);
    // run_lengths[j] is the length of the common run ending at (i - 1, j).
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for i in a_lo..a_hi {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        for j in b_lo..b_hi {
            if b[j] != a[i] {
                continue;
            }
            let len = match j.checked_sub(1) {
                Some(prev) => run_lengths.get(&prev).copied().unwrap_or(0) + 1,
                None => 1,
            };
            next_runs.insert(j, len);
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        run_lengths = next_runs;
    }
    best
}

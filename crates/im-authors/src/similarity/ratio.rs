//! Ratcliff/Obershelp sequence similarity
//!
//! The ratio is `2 * M / T`, where `T` is the total number of characters in
//! both strings and `M` the number of characters in matching blocks. Blocks
//! are found by taking the longest common substring (leftmost on ties) and
//! recursing on the pieces to its left and right.

/// Similarity ratio of two strings in `[0, 1]`.
///
/// Compares characters exactly; callers lower-case first for
/// case-insensitive matching. Two empty strings are identical (1.0). The
/// pair is put in a fixed order before matching so that
/// `similarity_ratio(a, b) == similarity_ratio(b, a)`.
///
/// # Examples
/// ```
/// use im_authors::similarity_ratio;
/// assert_eq!(similarity_ratio("abcd", "abcd"), 1.0);
/// assert_eq!(similarity_ratio("abcd", "wxyz"), 0.0);
/// assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
/// ```
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let total = first.len() + second.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&first, &second) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
pub(crate) fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start_a, start_b, len)`; earliest in `a`, then in `b`, on ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let width = bhi - blo;

    // run[j + 1] = length of the common run ending at a[i], b[blo + j]
    let mut prev = vec![0usize; width + 1];
    let mut run = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            run[col] = if a[i] == b[j] { prev[col - 1] + 1 } else { 0 };
            if run[col] > best_len {
                best_len = run[col];
                best_i = i + 1 - best_len;
                best_j = j + 1 - best_len;
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }

    (best_i, best_j, best_len)
}

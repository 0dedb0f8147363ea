//! Approximate substring distance

/// Similarity measure used by the fuzzy index
///
/// Inputs are already lowercased. Implementations must be deterministic.
pub trait FuzzyMatcher: Send + Sync {
    /// Number of edits separating `query` from its closest match in `candidate`
    fn distance(&self, query: &[char], candidate: &[char]) -> usize;
}

/// Optimal-string-alignment distance to the best-matching substring
///
/// Leading and trailing candidate characters are free, so `"paym"` is at
/// distance 0 from `"payments"`. Substitutions, insertions, deletions and
/// adjacent transpositions each cost 1. The result never exceeds the query
/// length.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringEditDistance;

impl FuzzyMatcher for SubstringEditDistance {
    fn distance(&self, query: &[char], candidate: &[char]) -> usize {
        let m = query.len();
        let n = candidate.len();
        if m == 0 {
            return 0;
        }
        if n == 0 {
            return m;
        }

        // Rows i-2, i-1 and i of the DP table; row 0 is all zeros (free start).
        let mut before_prev = vec![0usize; n + 1];
        let mut prev = vec![0usize; n + 1];
        let mut cur = vec![0usize; n + 1];

        for i in 1..=m {
            cur[0] = i;
            for j in 1..=n {
                let cost = usize::from(query[i - 1] != candidate[j - 1]);
                let mut best = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);

                if i > 1
                    && j > 1
                    && query[i - 1] == candidate[j - 2]
                    && query[i - 2] == candidate[j - 1]
                {
                    best = best.min(before_prev[j - 2] + 1);
                }

                cur[j] = best;
            }
            std::mem::swap(&mut before_prev, &mut prev);
            std::mem::swap(&mut prev, &mut cur);
        }

        // After the final swap `prev` holds row m; free end.
        prev.iter().copied().min().unwrap_or(m)
    }
}

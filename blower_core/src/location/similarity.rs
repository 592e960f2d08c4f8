//! Ratcliff/Obershelp string similarity, the same ratio `difflib` reports:
//! twice the number of matched characters over the combined length, where
//! matches are found by recursively taking the longest common substring.

/// Similarity ratio in [0, 1]; 1.0 means identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (len, i, j) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// (length, start in a, start in b) of the earliest longest common substring
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                cur[j + 1] = prev[j] + 1;
                if cur[j + 1] > best.0 {
                    best = (cur[j + 1], i + 1 - cur[j + 1], j + 1 - cur[j + 1]);
                }
            }
        }
        prev = cur;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(ratio("durban", "durban"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_misspelling() {
        // "johan" + "esburg" = 11 matched chars over 23
        let r = ratio("johanesburg", "johannesburg");
        assert!((r - 22.0 / 23.0).abs() < 1e-12, "ratio = {}", r);
    }

    #[test]
    fn test_symmetric_for_simple_cases() {
        assert!((ratio("pretoria", "pretorai") - ratio("pretorai", "pretoria")).abs() < 1e-12);
    }
}

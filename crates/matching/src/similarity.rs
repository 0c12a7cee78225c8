//! String similarity algorithms.

use crate::isolation::Delimiters;

/// Calculate the edit distance between two strings.
///
/// Deletion, insertion and substitution cost 1 each. With `count_swapping`
/// an adjacent transposition ("ab" vs "ba") is a single edit as well
/// (optimal string alignment variant of Damerau-Levenshtein).
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
/// * `count_swapping` - Treat swapped neighbours as one edit
///
/// # Returns
/// Number of edits needed to transform a into b
pub fn levenshtein(a: &str, b: &str, count_swapping: bool) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Transpositions look two rows back, so keep the full matrix
    let mut distance = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in distance.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        distance[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let current_a = a_chars[i - 1];
            let current_b = b_chars[j - 1];
            let cost = usize::from(current_a != current_b);

            distance[i][j] = (distance[i - 1][j] + 1)
                .min(distance[i][j - 1] + 1)
                .min(distance[i - 1][j - 1] + cost);

            if count_swapping
                && i > 1
                && j > 1
                && current_a == b_chars[j - 2]
                && a_chars[i - 2] == current_b
            {
                distance[i][j] = distance[i][j].min(distance[i - 2][j - 2] + cost);
            }
        }
    }

    distance[m][n]
}

/// Decide whether two strings are close enough to count as the same word.
///
/// The tolerance table is fixed: strings longer than 9 characters may
/// differ by 2 edits, strings longer than 3 by one, shorter ones must be
/// identical. Swapped neighbours count as one edit.
pub fn are_similar(a: &str, b: &str) -> bool {
    let length = a.chars().count().min(b.chars().count());
    let distance = levenshtein(a, b, true);

    distance == 0 || (length > 9 && distance <= 2) || (length > 3 && distance <= 1)
}

/// Jaro-Winkler similarity in `[0, 1]`, 1 meaning identical.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
/// * `favor_same_start` - Apply the Winkler common-prefix bonus
/// * `long_tolerance` - Extra adjustment for longer strings; only applies
///   together with `favor_same_start`
pub fn jaro_winkler(a: &str, b: &str, favor_same_start: bool, long_tolerance: bool) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let len_a = a_chars.len();
    let len_b = b_chars.len();

    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let window = (len_a.max(len_b) / 2).saturating_sub(1);
    let mut a_flags = vec![false; len_a];
    let mut b_flags = vec![false; len_b];
    let mut matches = 0usize;

    for i in 0..len_a {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(len_b);
        for j in start..end {
            if !b_flags[j] && a_chars[i] == b_chars[j] {
                a_flags[i] = true;
                b_flags[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut k = 0;
    let mut half_transpositions = 0usize;
    for i in 0..len_a {
        if !a_flags[i] {
            continue;
        }
        while !b_flags[k] {
            k += 1;
        }
        if a_chars[i] != b_chars[k] {
            half_transpositions += 1;
        }
        k += 1;
    }
    let transpositions = half_transpositions / 2;

    let m = matches as f64;
    let mut similarity =
        (m / len_a as f64 + m / len_b as f64 + (m - transpositions as f64) / m) / 3.0;

    if favor_same_start && similarity > 0.7 {
        let max_prefix = len_a.min(len_b).min(4);
        let prefix = a_chars
            .iter()
            .zip(&b_chars)
            .take(max_prefix)
            .take_while(|(x, y)| x == y)
            .count();
        similarity += prefix as f64 * 0.1 * (1.0 - similarity);

        let shorter = len_a.min(len_b);
        if long_tolerance && shorter > 4 && matches > prefix + 1 && 2 * matches >= shorter + prefix {
            similarity += (1.0 - similarity) * (matches - prefix - 1) as f64
                / (len_a + len_b - 2 * prefix + 2) as f64;
        }
    }

    similarity.min(1.0)
}

/// Find the first standalone approximate occurrence of `needle` in `haystack`.
///
/// Candidate windows are up to two characters shorter or longer than the
/// needle. Returns the character offset and the text found.
pub fn fuzzy_find(needle: &str, haystack: &str, delimiters: &Delimiters) -> Option<(usize, String)> {
    let chars: Vec<char> = haystack.chars().collect();
    fuzzy_windows(needle.chars().count(), &chars).find(|(pos, straw)| {
        are_similar(needle, straw) && delimiters.isolated_at(&chars, *pos, straw.chars().count())
    })
}

/// Window size offsets tried around the needle length.
pub(crate) const WINDOW_OFFSETS: [isize; 5] = [-2, -1, 0, 1, 2];

/// Every `(position, substring)` window the fuzzy scan looks at.
///
/// Only positions where the whole window fits are scanned.
pub(crate) fn fuzzy_windows(
    needle_len: usize,
    chars: &[char],
) -> impl Iterator<Item = (usize, String)> + '_ {
    WINDOW_OFFSETS
        .iter()
        .filter_map(move |offset| needle_len.checked_add_signed(*offset))
        .filter(move |&len| len > 0 && len <= chars.len())
        .flat_map(move |len| {
            chars
                .windows(len)
                .enumerate()
                .map(|(pos, window)| (pos, window.iter().collect::<String>()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein("hello", "hello", false), 0);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc", false), 3);
        assert_eq!(levenshtein("abcd", "", true), 4);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("hello", "hallo", false), 1);
        assert_eq!(levenshtein("helo", "hello", false), 1);
        assert_eq!(levenshtein("hello", "helo", false), 1);
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein("kitten", "sitting", false), 3);
    }

    #[test]
    fn test_levenshtein_swapping() {
        assert_eq!(levenshtein("form", "from", false), 2);
        assert_eq!(levenshtein("form", "from", true), 1);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe", false), 1);
    }

    #[test]
    fn test_are_similar_boundaries() {
        assert!(are_similar("kitten", "sitten"));
        assert!(!are_similar("cat", "dog"));
        assert!(!are_similar("cat", "cot"));
        assert!(are_similar("cat", "cat"));
        assert!(are_similar("house", "hosue"));
    }

    #[test]
    fn test_are_similar_long_words() {
        // Ten characters tolerate two edits
        assert!(are_similar("photosynthesis", "fotosynthesis"));
        assert!(are_similar("international", "internatoinl"));
        // Nine characters only one
        assert!(!are_similar("abcdefghi", "abcdefgxx"));
    }

    #[test]
    fn test_jaro_winkler_known_values() {
        let jaro = jaro_winkler("MARTHA", "MARHTA", false, false);
        assert!((jaro - 0.9444).abs() < 1e-3);

        let winkler = jaro_winkler("MARTHA", "MARHTA", true, false);
        assert!((winkler - 0.9611).abs() < 1e-3);

        let dixon = jaro_winkler("DIXON", "DICKSONX", true, false);
        assert!((dixon - 0.8133).abs() < 1e-3);
    }

    #[test]
    fn test_jaro_winkler_extremes() {
        assert_eq!(jaro_winkler("same", "same", true, true), 1.0);
        assert_eq!(jaro_winkler("abc", "xyz", true, true), 0.0);
        assert_eq!(jaro_winkler("", "abc", false, false), 0.0);
    }

    #[test]
    fn test_jaro_winkler_long_tolerance_raises_score() {
        let plain = jaro_winkler("dwayne", "duane", true, false);
        let tolerant = jaro_winkler("dwayne", "duane", true, true);
        assert!(tolerant >= plain);
    }

    #[test]
    fn test_fuzzy_find() {
        let delimiters = Delimiters::default();
        assert_eq!(
            fuzzy_find("house", "my hosue is red", &delimiters),
            Some((3, "hosue".to_string()))
        );
        assert_eq!(fuzzy_find("house", "my boat is red", &delimiters), None);
    }

    #[test]
    fn test_fuzzy_windows_skip_empty_lengths() {
        let chars: Vec<char> = "abc".chars().collect();
        let windows: Vec<_> = fuzzy_windows(1, &chars).collect();
        // Lengths 1, 2, 3 at every position where they fit
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0], (0, "a".to_string()));
        assert_eq!(windows[5], (0, "abc".to_string()));
    }

    #[test]
    fn test_fuzzy_windows_stay_within_text() {
        let chars: Vec<char> = "abcd".chars().collect();
        let windows: Vec<_> = fuzzy_windows(4, &chars).collect();
        // Lengths 2, 3, 4 fit; 5 and 6 do not
        assert_eq!(windows.len(), 3 + 2 + 1);
        assert!(windows.iter().all(|(pos, window)| pos + window.chars().count() <= 4));
        assert_eq!(windows.last(), Some(&(0, "abcd".to_string())));
    }

    proptest! {
        #[test]
        fn prop_levenshtein_symmetry(a in "\\PC{0,12}", b in "\\PC{0,12}", swap in any::<bool>()) {
            prop_assert_eq!(levenshtein(&a, &b, swap), levenshtein(&b, &a, swap));
        }

        #[test]
        fn prop_levenshtein_identity(a in "\\PC{0,16}", swap in any::<bool>()) {
            prop_assert_eq!(levenshtein(&a, &a, swap), 0);
        }

        #[test]
        fn prop_levenshtein_bounded_by_longer(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let longer = a.chars().count().max(b.chars().count());
            prop_assert!(levenshtein(&a, &b, true) <= longer);
            prop_assert!(levenshtein(&a, &b, true) <= levenshtein(&a, &b, false));
        }

        #[test]
        fn prop_jaro_winkler_in_unit_range(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let score = jaro_winkler(&a, &b, true, true);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}

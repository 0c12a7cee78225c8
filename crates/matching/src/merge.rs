//! Merging of detector results.

use crate::detect::{contains, Match};

/// Merge match lists from several detectors into one list ordered by position.
///
/// The first list is kept as is. Matches of later lists are only added when
/// no match kept so far overlaps their position, so earlier lists win
/// contested positions.
pub fn merge_matches<I>(lists: I) -> Vec<Match>
where
    I: IntoIterator<Item = Vec<Match>>,
{
    let mut lists = lists.into_iter();
    let mut merged = lists.next().unwrap_or_default();

    for list in lists {
        for candidate in list {
            if !contains(&merged, candidate.index) {
                merged.push(candidate);
            }
        }
    }

    merged.sort_by_key(|m| m.index);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(matched: &str, index: usize) -> Match {
        Match {
            keyword: matched.to_string(),
            matched: matched.to_string(),
            index,
        }
    }

    #[test]
    fn test_merge_nothing() {
        assert!(merge_matches(Vec::<Vec<Match>>::new()).is_empty());
    }

    #[test]
    fn test_merge_single_list_is_sorted() {
        let merged = merge_matches([vec![found("b", 9), found("a", 2)]]);
        assert_eq!(merged, vec![found("a", 2), found("b", 9)]);
    }

    #[test]
    fn test_duplicate_position_counted_once() {
        let exact = vec![found("house", 2)];
        let fuzzy = vec![found("house", 2), found("hosue", 14)];
        let merged = merge_matches([exact, Vec::new(), fuzzy]);
        assert_eq!(merged, vec![found("house", 2), found("hosue", 14)]);
    }

    #[test]
    fn test_earlier_list_wins() {
        let exact = vec![found("cat", 4)];
        let wildcard = vec![found("cats", 4)];
        let merged = merge_matches([exact, wildcard]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].matched, "cat");
    }

    #[test]
    fn test_nearby_later_match_suppressed() {
        // " house" starting one char before an exact hit refers to the same word
        let merged = merge_matches([vec![found("house", 3)], vec![found(" house", 2)]]);
        assert_eq!(merged, vec![found("house", 3)]);
    }
}

//! The filter applied on every recompute.

use crate::catalog::{CategoryFilter, SearchableItem};

/// Returns the items accepted by `category` whose title or body contains
/// `query`, ignoring case. An empty query matches everything. Dataset order
/// is preserved.
pub fn filter_items<'a>(
    items: &'a [SearchableItem],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a SearchableItem> {
    let needle = query.to_lowercase();

    items
        .iter()
        .filter(|item| category.accepts(item.category))
        .filter(|item| matches_query(item, &needle))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_query(item: &SearchableItem, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.title.to_lowercase().contains(needle) || item.body.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{sample_items, Category};

    fn ids(items: &[&SearchableItem]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn empty_query_and_all_returns_everything() {
        let out = filter_items(sample_items(), "", CategoryFilter::All);
        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let out = filter_items(sample_items(), "typescript", CategoryFilter::All);
        assert_eq!(ids(&out), vec![2]);

        let out = filter_items(sample_items(), "TYPEScript", CategoryFilter::All);
        assert_eq!(ids(&out), vec![2]);
    }

    #[test]
    fn body_text_is_searched() {
        // Only in the body of item 4
        let out = filter_items(sample_items(), "modern css", CategoryFilter::All);
        assert_eq!(ids(&out), vec![4]);
    }

    #[test]
    fn category_only_keeps_dataset_order() {
        let out = filter_items(
            sample_items(),
            "",
            CategoryFilter::Only(Category::Article),
        );
        assert_eq!(ids(&out), vec![3, 4]);
    }

    #[test]
    fn query_and_category_must_both_match() {
        let out = filter_items(
            sample_items(),
            "react",
            CategoryFilter::Only(Category::Article),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(filter_items(sample_items(), "zzz", CategoryFilter::All).is_empty());
    }

    #[test]
    fn whitespace_is_part_of_the_needle() {
        // "web " matches "Web Performance", "web  " does not match anything
        assert_eq!(
            ids(&filter_items(sample_items(), "web ", CategoryFilter::All)),
            vec![3]
        );
        assert!(filter_items(sample_items(), "web  ", CategoryFilter::All).is_empty());
    }

    #[test]
    fn rerunning_is_idempotent() {
        let a = filter_items(sample_items(), "re", CategoryFilter::All);
        let b = filter_items(sample_items(), "re", CategoryFilter::All);
        assert_eq!(a, b);
    }

    #[test]
    fn matches_reference_predicate_for_every_substring() {
        // Every substring of every title, in both cases, under every selector.
        for item in sample_items() {
            let chars: Vec<char> = item.title.chars().collect();
            for len in [1, 3, 5] {
                for window in chars.windows(len) {
                    let q: String = window.iter().collect();
                    for c in CategoryFilter::OPTIONS {
                        let out = filter_items(sample_items(), &q.to_uppercase(), c);
                        let expected: Vec<u32> = sample_items()
                            .iter()
                            .filter(|i| c.accepts(i.category))
                            .filter(|i| {
                                let q = q.to_lowercase();
                                i.title.to_lowercase().contains(&q)
                                    || i.body.to_lowercase().contains(&q)
                            })
                            .map(|i| i.id)
                            .collect();
                        assert_eq!(ids(&out), expected, "query {:?} / {}", q, c);
                    }
                }
            }
        }
    }
}

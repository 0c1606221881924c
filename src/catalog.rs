//! The fixed catalog the page searches over.
//!
//! Items are immutable and live for the whole process; nothing creates,
//! edits or removes them at runtime.

use crate::error::{Result, SearchPageError};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tutorial,
    Article,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Tutorial, Category::Article];

    /// Lowercase name, as used on the command line and in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tutorial => "tutorial",
            Category::Article => "article",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the category selector: either the "all" sentinel or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector options in display order
    pub const OPTIONS: [CategoryFilter; 3] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Tutorial),
        CategoryFilter::Only(Category::Article),
    ];

    pub fn accepts(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    /// Next option in the selector, wrapping around
    pub fn next(self) -> Self {
        let pos = self.position();
        Self::OPTIONS[(pos + 1) % Self::OPTIONS.len()]
    }

    /// Previous option in the selector, wrapping around
    pub fn prev(self) -> Self {
        let pos = self.position();
        Self::OPTIONS[(pos + Self::OPTIONS.len() - 1) % Self::OPTIONS.len()]
    }

    fn position(&self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|o| o == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = SearchPageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "tutorial" => Ok(CategoryFilter::Only(Category::Tutorial)),
            "article" => Ok(CategoryFilter::Only(Category::Article)),
            _ => Err(SearchPageError::UnknownCategory(s.to_string())),
        }
    }
}

/// One searchable entry of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchableItem {
    pub id: u32,
    pub title: &'static str,
    pub category: Category,
    pub body: &'static str,
    pub date: NaiveDate,
}

static SAMPLE: LazyLock<Vec<SearchableItem>> = LazyLock::new(|| {
    vec![
        SearchableItem {
            id: 1,
            title: "Getting Started with React",
            category: Category::Tutorial,
            body: "Learn the basics of React including components, props, and state...",
            date: ymd(2024, 3, 15),
        },
        SearchableItem {
            id: 2,
            title: "Advanced TypeScript Tips",
            category: Category::Tutorial,
            body: "Discover advanced TypeScript features that will improve your code...",
            date: ymd(2024, 3, 10),
        },
        SearchableItem {
            id: 3,
            title: "Web Performance Optimization",
            category: Category::Article,
            body: "Essential techniques for optimizing your web application performance...",
            date: ymd(2024, 3, 5),
        },
        SearchableItem {
            id: 4,
            title: "Building Responsive Layouts",
            category: Category::Article,
            body: "Master the art of creating responsive layouts using modern CSS...",
            date: ymd(2024, 2, 28),
        },
    ]
});

/// The full catalog, in display order
pub fn sample_items() -> &'static [SearchableItem] {
    &SAMPLE
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Only called with literal dates above
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_has_unique_ids_and_two_of_each_category() {
        let items = sample_items();
        assert_eq!(items.len(), 4);

        let ids: HashSet<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len());

        let tutorials = items
            .iter()
            .filter(|i| i.category == Category::Tutorial)
            .count();
        assert_eq!(tutorials, 2);
        assert_eq!(items[3].date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            " Article ".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Article)
        );
        assert!(matches!(
            "video".parse::<CategoryFilter>(),
            Err(SearchPageError::UnknownCategory(s)) if s == "video"
        ));
    }

    #[test]
    fn selector_cycles_in_both_directions() {
        let start = CategoryFilter::All;
        assert_eq!(start.next(), CategoryFilter::Only(Category::Tutorial));
        assert_eq!(start.next().next().next(), start);
        assert_eq!(start.prev(), CategoryFilter::Only(Category::Article));
    }

    #[test]
    fn all_accepts_everything() {
        for c in Category::ALL {
            assert!(CategoryFilter::All.accepts(c));
        }
        assert!(!CategoryFilter::Only(Category::Article).accepts(Category::Tutorial));
    }

    #[test]
    fn items_serialize_with_lowercase_category_and_iso_date() {
        let json = serde_json::to_value(&sample_items()[0]).unwrap();
        assert_eq!(json["category"], "tutorial");
        assert_eq!(json["date"], "2024-03-15");
    }
}

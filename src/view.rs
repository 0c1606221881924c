//! What the page shows for a given session, independent of the terminal.

use crate::catalog::{Category, CategoryFilter, SearchableItem};
use crate::session::SearchSession;

pub const TITLE: &str = "Search Articles";
pub const SUBTITLE: &str = "Discover tutorials, articles, and guides";
pub const PLACEHOLDER: &str = "Search...";
pub const EMPTY_MESSAGE: &str = "No results found. Try adjusting your search terms.";
pub const CLEAR_LABEL: &str = "Clear search";
pub const READ_MORE_LABEL: &str = "Read more \u{2192}";

/// Date format used on cards, e.g. "Mar 15, 2024"
const DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub query: String,
    /// Clear marker in the search box
    pub show_clear: bool,
    pub category: CategoryFilter,
    pub results: ResultsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Loading,
    Empty { show_clear: bool },
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: u32,
    pub title: String,
    pub category: Category,
    pub badge: String,
    pub date: String,
    pub body: String,
}

impl CardView {
    pub fn from_item(item: &SearchableItem) -> Self {
        Self {
            id: item.id,
            title: item.title.to_string(),
            category: item.category,
            badge: capitalize(item.category.as_str()),
            date: item.date.format(DATE_FORMAT).to_string(),
            body: item.body.to_string(),
        }
    }
}

pub fn page(session: &SearchSession) -> PageView {
    let show_clear = session.can_clear();

    let results = if session.is_loading() {
        ResultsView::Loading
    } else if session.results().is_empty() {
        ResultsView::Empty { show_clear }
    } else {
        ResultsView::Cards(
            session
                .results()
                .items()
                .iter()
                .map(|item| CardView::from_item(item))
                .collect(),
        )
    };

    PageView {
        query: session.raw_query().to_string(),
        show_clear,
        category: session.category(),
        results,
    }
}

/// Label shown in the category selector
pub fn selector_label(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "All Categories",
        CategoryFilter::Only(Category::Tutorial) => "Tutorials",
        CategoryFilter::Only(Category::Article) => "Articles",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchConfig;
    use std::time::{Duration, Instant};

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn loading_hides_cards() {
        let t0 = Instant::now();
        let s = SearchSession::mount(SearchConfig::default(), t0);
        assert_eq!(page(&s).results, ResultsView::Loading);
    }

    #[test]
    fn settled_page_lists_cards() {
        let t0 = Instant::now();
        let mut s = SearchSession::mount(SearchConfig::default(), t0);
        s.tick(t0 + 300 * MS);

        let view = page(&s);
        assert!(!view.show_clear);
        let ResultsView::Cards(cards) = view.results else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].badge, "Tutorial");
        assert_eq!(cards[0].date, "Mar 15, 2024");
        assert_eq!(cards[3].date, "Feb 28, 2024");
    }

    #[test]
    fn no_match_shows_empty_state_with_clear() {
        let t0 = Instant::now();
        let mut s = SearchSession::mount(SearchConfig::default(), t0);
        s.set_query("zzz", t0);
        s.tick(t0 + 600 * MS);

        let view = page(&s);
        assert_eq!(view.query, "zzz");
        assert!(view.show_clear);
        assert_eq!(view.results, ResultsView::Empty { show_clear: true });
    }

    #[test]
    fn selector_labels() {
        assert_eq!(selector_label(CategoryFilter::All), "All Categories");
        assert_eq!(
            selector_label(CategoryFilter::Only(Category::Article)),
            "Articles"
        );
    }
}

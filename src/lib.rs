//! searchpage - terminal search page over a fixed catalog
//!
//! A search box, a category selector and a list of matching tutorials and
//! articles. Typing is debounced; each settled query or category change
//! re-filters the catalog after a simulated request delay.
//!
//! # Features
//!
//! - **Debounced input**: only the last query typed within the quiet period is searched
//! - **Category filter**: all, tutorials or articles
//! - **Deterministic timing**: every state change takes the current `Instant`,
//!   so the whole flow can be driven without a terminal or real sleeps
//!
//! # Example
//!
//! ```
//! use searchpage::{CategoryFilter, SearchConfig, SearchSession};
//! use std::time::Instant;
//!
//! let now = Instant::now();
//! let mut session = SearchSession::mount(SearchConfig::default(), now);
//! session.set_query("typescript", now);
//! session.set_category(CategoryFilter::All, now);
//! session.run_until_idle(now);
//!
//! assert_eq!(session.results().ids(), vec![2]);
//! assert!(!session.is_loading());
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod logging;
pub mod session;
pub mod timer;
pub mod tui;
pub mod view;

// Re-export main types
pub use catalog::{sample_items, Category, CategoryFilter, SearchableItem};
pub use error::{Result, SearchPageError};
pub use filter::filter_items;
pub use session::{Action, QueryState, ResultSet, SearchSession, SessionEvent};
pub use timer::{Timer, TimerHandle};

use std::time::{Duration, Instant};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timing configuration for a search page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period before a typed query is searched
    pub debounce: Duration,
    /// Simulated request time of each search
    pub latency: Duration,
    /// Redraw interval of the TUI
    pub tick_rate: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            latency: Duration::from_millis(300),
            tick_rate: Duration::from_millis(50),
        }
    }
}

/// Results the page settles on for `query` and `category`, going through the
/// same debounce and recompute path as interactive input.
pub fn settled_results(
    config: SearchConfig,
    query: &str,
    category: CategoryFilter,
) -> Vec<&'static SearchableItem> {
    let now = Instant::now();
    let mut session = SearchSession::mount(config, now);
    session.set_query(query, now);
    session.set_category(category, now);
    session.run_until_idle(now);
    let items = session.results().items().to_vec();
    session.unmount();
    items
}

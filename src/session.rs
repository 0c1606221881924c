//! Search page state machine.
//!
//! A [`SearchSession`] owns the query state, the displayed result set and two
//! timers: the debounce timer, re-armed on every raw query change, and the
//! latency timer that stands in for a search request. State only changes in
//! response to an [`Action`]; all time is passed in explicitly.
//!
//! ```text
//! keystroke --> raw query --(quiet period)--> debounced query --+
//!                                                               +--(latency)--> results
//! selector  --> category  ---------------------------------------+
//! ```

use crate::catalog::{sample_items, CategoryFilter, SearchableItem};
use crate::filter::filter_items;
use crate::timer::Timer;
use crate::SearchConfig;
use std::time::Instant;
use tracing::{debug, info};

/// Query inputs of the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Text as typed, updated on every keystroke
    pub raw: String,
    /// Text as of the last quiet period
    pub debounced: String,
    pub category: CategoryFilter,
}

/// Items currently displayed, in dataset order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    items: Vec<&'static SearchableItem>,
}

impl ResultSet {
    pub fn items(&self) -> &[&'static SearchableItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<u32> {
        self.items.iter().map(|i| i.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Inputs captured when a recompute is scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
struct Recompute {
    query: String,
    category: CategoryFilter,
}

/// Input to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetQuery(String),
    SetCategory(CategoryFilter),
    Clear,
    /// Let time pass; fires due timers
    Tick,
}

/// What a dispatched action caused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    DebounceArmed { generation: u64 },
    DebounceCommitted { query: String },
    RecomputeArmed { generation: u64 },
    ResultsCommitted { count: usize },
}

#[derive(Debug)]
pub struct SearchSession {
    config: SearchConfig,
    items: &'static [SearchableItem],
    state: QueryState,
    results: ResultSet,
    loading: bool,
    mounted: bool,
    debounce: Timer<String>,
    latency: Timer<Recompute>,
}

impl SearchSession {
    /// Mount a session over the built-in catalog.
    pub fn mount(config: SearchConfig, now: Instant) -> Self {
        Self::mount_with_items(config, sample_items(), now)
    }

    /// Mount over `items`: empty query, "all" selected, every item shown, and
    /// an initial search scheduled.
    pub fn mount_with_items(
        config: SearchConfig,
        items: &'static [SearchableItem],
        now: Instant,
    ) -> Self {
        let mut session = Self {
            config,
            items,
            state: QueryState::default(),
            results: ResultSet {
                items: items.iter().collect(),
            },
            loading: false,
            mounted: true,
            debounce: Timer::new(),
            latency: Timer::new(),
        };
        info!(items = items.len(), "search session mounted");

        let mut events = Vec::new();
        session.arm_recompute(now, &mut events);
        session
    }

    /// Cancel pending timers. The session ignores every action afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let debounce = self.debounce.cancel();
        let latency = self.latency.cancel();
        self.mounted = false;
        info!(
            pending_debounce = debounce,
            pending_search = latency,
            "search session unmounted"
        );
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.mounted {
            debug!(?action, "action after unmount ignored");
            return events;
        }

        match action {
            Action::SetQuery(text) => self.update_query(text, now, &mut events),
            Action::SetCategory(category) => self.update_category(category, now, &mut events),
            Action::Clear => {
                debug!("clear");
                self.update_query(String::new(), now, &mut events);
                self.update_category(CategoryFilter::All, now, &mut events);
            }
            Action::Tick => self.fire_due(now, &mut events),
        }
        events
    }

    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) -> Vec<SessionEvent> {
        self.dispatch(Action::SetQuery(text.into()), now)
    }

    pub fn set_category(&mut self, category: CategoryFilter, now: Instant) -> Vec<SessionEvent> {
        self.dispatch(Action::SetCategory(category), now)
    }

    pub fn clear(&mut self, now: Instant) -> Vec<SessionEvent> {
        self.dispatch(Action::Clear, now)
    }

    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        self.dispatch(Action::Tick, now)
    }

    fn update_query(&mut self, text: String, now: Instant, events: &mut Vec<SessionEvent>) {
        if text == self.state.raw {
            return;
        }
        self.state.raw = text;
        let handle = self
            .debounce
            .arm(now, self.config.debounce, self.state.raw.clone());
        debug!(query = %self.state.raw, generation = handle.generation(), "debounce armed");
        events.push(SessionEvent::DebounceArmed {
            generation: handle.generation(),
        });
    }

    fn update_category(
        &mut self,
        category: CategoryFilter,
        now: Instant,
        events: &mut Vec<SessionEvent>,
    ) {
        if category == self.state.category {
            return;
        }
        debug!(from = %self.state.category, to = %category, "category changed");
        self.state.category = category;
        self.arm_recompute(now, events);
    }

    fn arm_recompute(&mut self, now: Instant, events: &mut Vec<SessionEvent>) {
        let snapshot = Recompute {
            query: self.state.debounced.clone(),
            category: self.state.category,
        };
        self.loading = true;
        let handle = self.latency.arm(now, self.config.latency, snapshot);
        events.push(SessionEvent::RecomputeArmed {
            generation: handle.generation(),
        });
    }

    /// Debounce before latency: a commit arms the recompute that depends on it.
    fn fire_due(&mut self, now: Instant, events: &mut Vec<SessionEvent>) {
        if let Some(fired) = self.debounce.poll(now) {
            if fired.payload != self.state.debounced {
                debug!(query = %fired.payload, "debounced query committed");
                self.state.debounced = fired.payload;
                events.push(SessionEvent::DebounceCommitted {
                    query: self.state.debounced.clone(),
                });
                // Scheduled from the moment the quiet period ended
                self.arm_recompute(fired.deadline, events);
            }
        }

        if let Some(fired) = self.latency.poll(now) {
            let Recompute { query, category } = fired.payload;
            self.results = ResultSet {
                items: filter_items(self.items, &query, category),
            };
            self.loading = false;
            debug!(
                query = %query,
                category = %category,
                count = self.results.len(),
                "results committed"
            );
            events.push(SessionEvent::ResultsCommitted {
                count: self.results.len(),
            });
        }
    }

    /// Fire every pending timer in deadline order, as if no further input
    /// arrived. Returns the instant the session went idle.
    pub fn run_until_idle(&mut self, now: Instant) -> Instant {
        let mut clock = now;
        while let Some(deadline) = self.next_deadline() {
            clock = clock.max(deadline);
            self.tick(clock);
        }
        clock
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.debounce.deadline(), self.latency.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn raw_query(&self) -> &str {
        &self.state.raw
    }

    pub fn debounced_query(&self) -> &str {
        &self.state.debounced
    }

    pub fn category(&self) -> CategoryFilter {
        self.state.category
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The clear control is only offered while there is text to clear.
    pub fn can_clear(&self) -> bool {
        !self.state.raw.is_empty()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

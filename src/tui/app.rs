use crate::catalog::CategoryFilter;
use crate::session::{Action, SearchSession, SessionEvent};
use crate::tui::list::ListState;
use crate::tui::search::SearchState;
use crate::tui::ui;
use crate::SearchConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};
use tracing::debug;

/// Which widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Category,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Category,
            Focus::Category => Focus::Results,
            Focus::Results => Focus::Search,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::Results,
            Focus::Category => Focus::Search,
            Focus::Results => Focus::Category,
        }
    }
}

pub struct App {
    pub session: SearchSession,

    // Sub-states
    pub search: SearchState,
    pub list: ListState,
    pub focus: Focus,

    pub status_message: String,
    /// Advanced every tick while a search is in flight
    pub spinner_tick: usize,

    tick_rate: Duration,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(config: SearchConfig, now: Instant) -> Self {
        let tick_rate = config.tick_rate;
        let session = SearchSession::mount(config, now);
        let mut list = ListState::default();
        list.reset(session.results().len());

        Self {
            session,
            search: SearchState::default(),
            list,
            focus: Focus::Search,
            status_message: "Ready".to_string(),
            spinner_tick: 0,
            tick_rate,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> crate::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| crate::SearchPageError::TerminalError(e.to_string()))?;

            let timeout = self.poll_timeout(last_tick, Instant::now());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Instant::now());
                    }
                }
            }

            self.on_tick(Instant::now());
            if last_tick.elapsed() >= self.tick_rate {
                if self.session.is_loading() {
                    self.spinner_tick = self.spinner_tick.wrapping_add(1);
                }
                last_tick = Instant::now();
            }

            if self.should_quit {
                self.session.unmount();
                return Ok(());
            }
        }
    }

    /// Wait until the next redraw tick or the next session deadline,
    /// whichever comes first.
    fn poll_timeout(&self, last_tick: Instant, now: Instant) -> Duration {
        let tick = self.tick_rate.saturating_sub(now.duration_since(last_tick));
        match self.session.next_deadline() {
            Some(deadline) => tick.min(deadline.saturating_duration_since(now)),
            None => tick,
        }
    }

    /// Fire due timers and follow up on committed results
    pub fn on_tick(&mut self, now: Instant) {
        let events = self.dispatch(Action::Tick, now);
        for event in events {
            if let SessionEvent::ResultsCommitted { count } = event {
                self.list.reset(count);
                self.status_message = match count {
                    1 => "1 result".to_string(),
                    n => format!("{} results", n),
                };
            }
        }
    }

    fn dispatch(&mut self, action: Action, now: Instant) -> Vec<SessionEvent> {
        self.session.dispatch(action, now)
    }

    fn sync_query(&mut self, now: Instant) {
        let text = self.search.query.clone();
        self.dispatch(Action::SetQuery(text), now);
    }

    fn set_category(&mut self, category: CategoryFilter, now: Instant) {
        self.dispatch(Action::SetCategory(category), now);
    }

    /// Clear query and category. Only offered while the query is non-empty.
    pub fn clear(&mut self, now: Instant) {
        if !self.session.can_clear() {
            return;
        }
        self.search.clear();
        self.dispatch(Action::Clear, now);
        self.focus = Focus::Search;
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear(now);
                return;
            }
            KeyCode::Esc => {
                if self.session.can_clear() {
                    self.clear(now);
                } else if self.focus == Focus::Search {
                    self.focus = Focus::Results;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key, now),
            Focus::Category => self.handle_category_key(key, now),
            Focus::Results => self.handle_results_key(key, now),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert(c);
                self.sync_query(now);
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.sync_query(now);
                }
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.sync_query(now);
                }
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(),
            KeyCode::Down | KeyCode::Enter => {
                self.focus = Focus::Results;
            }
            _ => {}
        }
    }

    fn handle_category_key(&mut self, key: KeyEvent, now: Instant) {
        let current = self.session.category();
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.set_category(current.prev(), now);
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.set_category(current.next(), now);
            }
            KeyCode::Char('a') => self.set_category(CategoryFilter::All, now),
            KeyCode::Enter => {
                self.focus = Focus::Results;
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent, now: Instant) {
        let total = self.session.results().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_prev(total),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(total),
            KeyCode::PageUp => self.list.page_up(total),
            KeyCode::PageDown => self.list.page_down(total),
            KeyCode::Home => self.list.select_first(total),
            KeyCode::End => self.list.select_last(total),

            KeyCode::Enter => {
                // "Read more" has no destination
                if let Some(item) = self
                    .list
                    .selected
                    .and_then(|i| self.session.results().items().get(i))
                {
                    debug!(id = item.id, "read more pressed");
                }
            }

            KeyCode::Char('/') => {
                self.focus = Focus::Search;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus = Focus::Search;
                self.search.end();
                self.search.insert(c);
                self.sync_query(now);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            press(app, KeyCode::Char(c), now);
        }
    }

    fn settled_app(t0: Instant) -> App {
        let mut app = App::new(SearchConfig::default(), t0);
        app.on_tick(t0 + 300 * MS);
        app
    }

    #[test]
    fn typing_feeds_the_debounced_search() {
        let t0 = Instant::now();
        let mut app = settled_app(t0);
        let base = t0 + 300 * MS;

        type_str(&mut app, "typescript", base);
        assert_eq!(app.session.raw_query(), "typescript");

        app.on_tick(base + 600 * MS);
        assert_eq!(app.session.results().ids(), vec![2]);
        assert_eq!(app.status_message, "1 result");
        assert_eq!(app.list.selected, Some(0));
    }

    #[test]
    fn esc_clears_then_leaves_search_then_quits() {
        let t0 = Instant::now();
        let mut app = settled_app(t0);
        let base = t0 + 300 * MS;

        type_str(&mut app, "zzz", base);
        press(&mut app, KeyCode::Esc, base + 10 * MS);
        assert_eq!(app.search.query, "");
        assert_eq!(app.session.raw_query(), "");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc, base + 20 * MS);
        assert_eq!(app.focus, Focus::Results);
        press(&mut app, KeyCode::Esc, base + 30 * MS);
        assert!(app.should_quit);
    }

    #[test]
    fn category_focus_cycles_selector() {
        let t0 = Instant::now();
        let mut app = settled_app(t0);
        let base = t0 + 300 * MS;

        press(&mut app, KeyCode::Tab, base);
        assert_eq!(app.focus, Focus::Category);
        press(&mut app, KeyCode::Right, base);
        press(&mut app, KeyCode::Right, base);
        assert_eq!(app.session.category().as_str(), "article");

        app.on_tick(base + 300 * MS);
        assert_eq!(app.session.results().ids(), vec![3, 4]);

        press(&mut app, KeyCode::Left, base + 400 * MS);
        assert_eq!(app.session.category().as_str(), "tutorial");
    }

    #[test]
    fn clear_is_unavailable_with_empty_query() {
        let t0 = Instant::now();
        let mut app = settled_app(t0);
        let base = t0 + 300 * MS;

        press(&mut app, KeyCode::Tab, base);
        press(&mut app, KeyCode::Right, base);
        app.handle_key(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            base,
        );
        // Category untouched: the clear control is hidden without a query
        assert_eq!(app.session.category().as_str(), "tutorial");
    }

    #[test]
    fn printable_key_in_results_jumps_to_search() {
        let t0 = Instant::now();
        let mut app = settled_app(t0);
        let base = t0 + 300 * MS;

        app.focus = Focus::Results;
        press(&mut app, KeyCode::Down, base);
        assert_eq!(app.list.selected, Some(1));
        press(&mut app, KeyCode::Enter, base);
        assert_eq!(app.session.raw_query(), "");

        press(&mut app, KeyCode::Char('w'), base);
        assert_eq!(app.focus, Focus::Search);
        assert_eq!(app.session.raw_query(), "w");
    }

    #[test]
    fn poll_timeout_never_overshoots_a_deadline() {
        let t0 = Instant::now();
        let app = App::new(SearchConfig::default(), t0);
        // 40ms left until the redraw tick, 10ms until the initial search lands
        let timeout = app.poll_timeout(t0 + 280 * MS, t0 + 290 * MS);
        assert_eq!(timeout, 10 * MS);

        let idle = settled_app(t0);
        assert_eq!(idle.poll_timeout(t0, t0 + 20 * MS), 30 * MS);
    }
}

//! Interactive terminal search page
//!
//! Layout:
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Search Articles                        │
//! │           Discover tutorials, articles, and guides           │
//! ├ Search ─────────────────────────────┬ Category ──────────────┤
//! │  typescript                      ✕  │  ◂ All Categories ▸    │
//! ├─────────────────────────────────────┴────────────────────────┤
//! │ Advanced TypeScript Tips                                     │
//! │ 🎓  Tutorial   Mar 10, 2024                                  │
//! │ Discover advanced TypeScript features that will improve...   │
//! │ Read more →                                                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ 1 result                      Tab:Focus ... Ctrl+Q:Quit      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod colors;
pub mod list;
pub mod search;
pub mod ui;

use crate::error::{Result, SearchPageError};
use crate::SearchConfig;
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{info, warn};

pub use app::App;

/// Run the search page until the user quits. The terminal is restored on
/// every path out of here, including failed setup. An event loop error is
/// returned in preference to a restore error.
pub fn run(config: SearchConfig) -> Result<()> {
    enable_raw_mode().map_err(|e| SearchPageError::terminal("enable raw mode", e))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = restore_terminal(&mut io::stdout(), disable_raw_mode);
        return Err(SearchPageError::terminal("enter alternate screen", e));
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal(&mut io::stdout(), disable_raw_mode);
            return Err(SearchPageError::terminal("create terminal", e));
        }
    };

    info!(?config, "starting search page");
    let mut app = App::new(config, Instant::now());
    let result = app.run(&mut terminal);
    drop(terminal);

    let restored = restore_terminal(&mut io::stdout(), disable_raw_mode);
    if let Err(e) = &restored {
        warn!(error = %e, "failed to restore terminal");
    }

    info!("search page closed");
    result?;
    restored.map_err(|e| SearchPageError::terminal("restore terminal", e))
}

/// Leave raw mode, leave the alternate screen and show the cursor. Every step
/// runs even when an earlier one fails; the first error is returned.
fn restore_terminal<W, F>(out: &mut W, disable_raw: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    let raw = disable_raw();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw.and(screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    // CSI ?1049l and CSI ?25h
    const LEAVE_ALTERNATE_SCREEN: &[u8] = b"\x1b[?1049l";
    const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn restore_still_leaves_alternate_screen_when_raw_mode_fails() {
        let mut out = Vec::new();
        let result = restore_terminal(&mut out, || {
            Err(io::Error::other("tcsetattr failed"))
        });

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "tcsetattr failed");
        assert!(contains(&out, LEAVE_ALTERNATE_SCREEN));
        assert!(contains(&out, SHOW_CURSOR));
    }

    #[test]
    fn restore_runs_every_step_on_success() {
        let mut out = Vec::new();
        let mut raw_disabled = false;
        restore_terminal(&mut out, || {
            raw_disabled = true;
            Ok(())
        })
        .unwrap();

        assert!(raw_disabled);
        assert!(contains(&out, LEAVE_ALTERNATE_SCREEN));
        assert!(contains(&out, SHOW_CURSOR));
    }
}

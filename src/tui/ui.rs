use crate::catalog::CategoryFilter;
use crate::tui::app::{App, Focus};
use crate::tui::colors;
use crate::view::{self, CardView, PageView, ResultsView};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rows per card: border, title, badge/date, two body lines, read more, border
pub const CARD_HEIGHT: u16 = 7;
const SELECTOR_WIDTH: u16 = 24;
const BODY_LINES: usize = 2;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let page = view::page(&app.session);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Search bar + selector
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, chunks[0]);
    let cursor = draw_search_row(frame, app, &page, chunks[1]);
    draw_results(frame, app, &page, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if app.focus == Focus::Search {
        frame.set_cursor_position(cursor);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            view::TITLE,
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(view::SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Returns where the text cursor belongs inside the search box
fn draw_search_row(frame: &mut Frame, app: &App, page: &PageView, area: Rect) -> Position {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SELECTOR_WIDTH)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::focus_border(app.focus == Focus::Search))
        .title(" Search ");

    let inner = block.inner(cols[0]);
    frame.render_widget(block, cols[0]);
    let text_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);
    let text_area = text_cols[0];

    // One leading space, then as much of the query as fits around the cursor
    let text_width = (text_area.width as usize).saturating_sub(1);
    let (visible, cursor_offset) =
        scroll_window(&page.query, app.search.cursor_column(), text_width);

    let text = if page.query.is_empty() {
        Span::styled(
            format!(" {}", view::PLACEHOLDER),
            Style::default()
                .fg(colors::MUTED)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(format!(" {}", visible), Style::default().fg(Color::White))
    };
    // Clear marker replaces the search glyph while there is text
    let marker = if page.show_clear {
        Span::styled("\u{2715} ", Style::default().fg(Color::Gray))
    } else {
        Span::styled("\u{1F50D} ", Style::default().fg(colors::MUTED))
    };

    frame.render_widget(Paragraph::new(Line::from(text)), text_area);
    frame.render_widget(Paragraph::new(Line::from(marker)), text_cols[1]);

    draw_selector(frame, page.category, app.focus == Focus::Category, cols[1]);

    // cursor_offset < text_width, which itself fits in the area width
    let column = u16::try_from(1 + cursor_offset).unwrap_or(text_area.width);
    let cursor_x = text_area
        .x
        .saturating_add(column)
        .min(text_area.right().saturating_sub(1));
    Position::new(cursor_x, text_area.y)
}

/// The part of `text` shown in a box `width` columns wide, scrolled so that
/// `cursor_col` stays in view. Returns the visible text and the cursor's
/// column within it.
pub fn scroll_window(text: &str, cursor_col: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    // The last column is kept free for a cursor at the end of the text
    let scroll = cursor_col.saturating_sub(width - 1);

    let mut skipped = 0;
    let mut used = 0;
    let mut visible = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if skipped < scroll {
            skipped += w;
            continue;
        }
        if used + w > width {
            break;
        }
        visible.push(c);
        used += w;
    }

    let offset = cursor_col.saturating_sub(skipped).min(width - 1);
    (visible, offset)
}

fn draw_selector(frame: &mut Frame, category: CategoryFilter, focused: bool, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::focus_border(focused))
        .title(" Category ");

    let style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let label = format!("\u{25C2} {} \u{25B8}", view::selector_label(category));
    frame.render_widget(
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_results(frame: &mut Frame, app: &mut App, page: &PageView, area: Rect) {
    match &page.results {
        ResultsView::Loading => {
            let text = format!("{} Searching...", colors::spinner_frame(app.spinner_tick));
            let y = area.y + area.height / 2;
            frame.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(colors::ACCENT))
                    .alignment(Alignment::Center),
                Rect::new(area.x, y, area.width, 1),
            );
        }
        ResultsView::Empty { show_clear } => draw_empty_state(frame, *show_clear, area),
        ResultsView::Cards(cards) => draw_cards(frame, app, cards, area),
    }
}

fn draw_empty_state(frame: &mut Frame, show_clear: bool, area: Rect) {
    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            view::EMPTY_MESSAGE,
            Style::default().fg(Color::Gray),
        )),
    ];
    if show_clear {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("[ {} ]  Ctrl+L", view::CLEAR_LABEL),
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.x, area.y, area.width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::MUTED));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}

fn draw_cards(frame: &mut Frame, app: &mut App, cards: &[CardView], area: Rect) {
    let visible = (area.height / CARD_HEIGHT).max(1) as usize;
    app.list.visible_rows = visible;

    let start = app.list.scroll_offset.min(cards.len().saturating_sub(1));
    let end = (start + visible).min(cards.len());

    for (slot, index) in (start..end).enumerate() {
        let y = area.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        if height < 3 {
            break;
        }
        let selected = app.focus == Focus::Results && app.list.selected == Some(index);
        draw_card(
            frame,
            &cards[index],
            selected,
            Rect::new(area.x, y, area.width, height),
        );
    }
}

fn draw_card(frame: &mut Frame, card: &CardView, selected: bool, area: Rect) {
    let category = card.category;
    let bg = if selected {
        colors::CARD_SELECTED_BG
    } else {
        Color::Reset
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(colors::MUTED)
        })
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(colors::color_for_category(category))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("{} ", colors::icon_for_category(category))),
            Span::styled(format!(" {} ", card.badge), colors::badge_style(category)),
            Span::styled(format!("  {}", card.date), Style::default().fg(Color::Gray)),
        ]),
    ];
    for body_line in clamp_lines(&card.body, inner.width as usize, BODY_LINES) {
        lines.push(Line::from(Span::styled(
            body_line,
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(Span::styled(
        view::READ_MORE_LABEL,
        Style::default().fg(colors::ACCENT),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if app.session.is_loading() {
        " Searching...".to_string()
    } else {
        format!(" {}", app.status_message)
    };

    let right_text = " Tab:Focus  \u{2190}\u{2192}:Category  \u{2191}\u{2193}:Scroll  Esc:Clear/Back  Ctrl+Q:Quit ";

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        left_text
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(colors::HEADER_BG));

    frame.render_widget(status, area);
}

/// Word-wrap `text` into at most `max_lines` lines of `width` columns.
/// Overflow is cut and the last line ends with an ellipsis.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let sep = if current.is_empty() { 0 } else { 1 };
        if current.width() + sep + word.width() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        // A single word wider than the line is hard-cut and ends the text
        if word.width() > width {
            let (head, _) = split_at_width(word, width);
            lines.push(head.to_string());
            truncated = true;
            break;
        } else {
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        if lines.len() < max_lines {
            lines.push(current);
        } else {
            truncated = true;
        }
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            let (head, _) = split_at_width(last, width.saturating_sub(1));
            *last = format!("{}\u{2026}", head.trim_end());
        }
    }
    lines
}

fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return s.split_at(i);
        }
        used += w;
    }
    (s, "")
}

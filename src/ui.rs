use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Paragraph},
};

use crate::app_core::state::{AppState, FETCH_FAILED_MESSAGE, FrameState};
use crate::data;

/// How an answer row is presented at the current point in the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    Plain,
    Focused,
    /// Revealed as the right breed (picked or not).
    Correct,
    /// Picked wrongly.
    Incorrect,
    /// Not involved in a settled round.
    Dimmed,
}

/// Main UI entry point that renders the entire application layout.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),                                // Image frame
            Constraint::Length(app.choice_count as u16 + 2),   // Answer rows
            Constraint::Length(1),                             // Status bar
        ])
        .split(f.area());

    app.frame_area = Some(chunks[0]);

    render_frame(f, app, chunks[0]);
    render_options(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if app.show_help {
        render_help_overlay(f, app);
    }
}

/// Renders the image frame pane: placeholder, download progress, loaded
/// image card, or the fixed failure message.
fn render_frame(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(app.theme.text)
        .title(" Doggo ")
        .title_alignment(Alignment::Left)
        .title_style(app.theme.title);

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    match &app.frame {
        FrameState::Fetching => {
            render_centered_line(f, inner, "Fetching doggo...", app.theme.muted);
        }
        FrameState::Failed => {
            render_centered_line(f, inner, FETCH_FAILED_MESSAGE, app.theme.incorrect);
        }
        FrameState::Loading {
            file_name,
            progress,
        } => {
            let middle = vertical_middle(inner);
            let label = Paragraph::new(Line::from(vec![
                Span::styled("Loading image... ", app.theme.text),
                Span::styled(file_name.as_str(), app.theme.muted),
            ]))
            .alignment(Alignment::Center);
            f.render_widget(label, middle);

            if middle.y + 1 < inner.y + inner.height {
                let gauge_area = Rect::new(
                    inner.x + inner.width / 4,
                    middle.y + 1,
                    inner.width / 2,
                    1,
                );
                let gauge = LineGauge::default()
                    .filled_style(app.theme.title)
                    .unfilled_style(app.theme.muted)
                    .ratio(data::progress_ratio(*progress));
                f.render_widget(gauge, gauge_area);
            }
        }
        FrameState::Loaded(card) => {
            let lines = vec![
                Line::styled(card.file_name.clone(), app.theme.title),
                Line::styled(
                    format!(
                        "{} • {}",
                        card.content_type.as_deref().unwrap_or("image"),
                        format_bytes(card.byte_len)
                    ),
                    app.theme.muted,
                ),
                Line::raw(""),
                Line::styled("Which breed is this doggo?", app.theme.text),
            ];
            let top = inner.y + (inner.height.saturating_sub(lines.len() as u16)) / 2;
            let card_area = Rect::new(
                inner.x,
                top,
                inner.width,
                (lines.len() as u16).min(inner.height),
            );
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                card_area,
            );
        }
    }
}

/// Renders the answer rows. Empty while fetching or after a failure.
fn render_options(f: &mut Frame, app: &mut AppState, area: Rect) {
    let is_open = app.round.is_some() && app.answered.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(app.theme.list_normal)
        .title(" Which breed? ")
        .title_alignment(Alignment::Left)
        .title_style(app.theme.title)
        .title_bottom(if is_open {
            Line::from(" ↑/↓ move • Enter/1-9 answer ").right_aligned()
        } else {
            Line::from("").right_aligned()
        });

    app.options_content_area = Some(block.inner(area));

    let Some(round) = &app.round else {
        f.render_widget(block, area);
        return;
    };

    let items: Vec<ListItem> = round
        .choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let mark = choice_presentation(app, idx);
            let style = mark_style(app, mark);
            let suffix = match mark {
                ChoiceMark::Correct => " ✔",
                ChoiceMark::Incorrect => " ✘",
                _ => "",
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", idx + 1), app.theme.muted),
                Span::styled(format!("{}{}", choice, suffix), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Renders the one-line status bar with the session tally and the clickable
/// refresh button.
fn render_status_bar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let left = Line::from(vec![
        Span::styled(format!(" doggo-tui {} ", app.app_version), app.theme.title),
        Span::styled(
            format!("Score {}/{} ", app.rounds_won, app.rounds_played),
            app.theme.text,
        ),
        Span::styled("• ? help • q quit ", app.theme.muted),
    ]);
    f.render_widget(Paragraph::new(left).style(app.theme.text), area);

    let button_label = " new doggo (r) ";
    let button_width = button_label.len() as u16;
    if area.width > button_width {
        let button_area = Rect::new(
            area.x + area.width - button_width,
            area.y,
            button_width,
            1,
        );
        app.refresh_area = Some(button_area);
        f.render_widget(
            Paragraph::new(button_label).style(app.theme.list_selected),
            button_area,
        );
    } else {
        app.refresh_area = None;
    }
}

fn render_help_overlay(f: &mut Frame, app: &AppState) {
    let area = centered_rect(42, 11, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::raw(""),
        help_line(app, "1-9 / Enter", "answer"),
        help_line(app, "↑/↓, j/k", "move focus"),
        help_line(app, "r, n", "fetch a new doggo"),
        help_line(app, "mouse", "click an answer row"),
        help_line(app, "?", "toggle this help"),
        help_line(app, "q, Esc", "quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .title(" Help ")
        .title_alignment(Alignment::Left)
        .title_style(app.theme.title)
        .style(Style::default().bg(app.theme.background));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn help_line(app: &AppState, keys: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), app.theme.title),
        Span::styled(action.to_string(), app.theme.text),
    ])
}

/// Decides how the answer row at `idx` is shown.
pub fn choice_presentation(app: &AppState, idx: usize) -> ChoiceMark {
    let Some(round) = &app.round else {
        return ChoiceMark::Plain;
    };
    match app.answered {
        None => {
            if idx == app.focused_choice {
                ChoiceMark::Focused
            } else {
                ChoiceMark::Plain
            }
        }
        Some(picked) => {
            if round.is_correct(idx) {
                ChoiceMark::Correct
            } else if idx == picked {
                ChoiceMark::Incorrect
            } else {
                ChoiceMark::Dimmed
            }
        }
    }
}

fn mark_style(app: &AppState, mark: ChoiceMark) -> Style {
    match mark {
        ChoiceMark::Plain => app.theme.list_normal,
        ChoiceMark::Focused => app.theme.list_selected,
        ChoiceMark::Correct => app.theme.correct,
        ChoiceMark::Incorrect => app.theme.incorrect,
        ChoiceMark::Dimmed => app.theme.muted,
    }
}

/// Human-readable byte count, e.g. `34.2 KB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn render_centered_line(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(Span::styled(text.to_string(), style))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, vertical_middle(area));
}

fn vertical_middle(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, 1)
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus the
//! input modes the runtime switches between (search, prompts, row menu).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Row,
        Table, TableState, Wrap,
    },
};
use image::RgbImage;
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, SEEK_SCALE};
use crate::audio::{AudioEngine, EngineStatus};
use crate::config::ControlsSettings;
use crate::error::NoticeLevel;
use crate::session::KeyValueStore;

/// Entries of the per-row menu, in display order.
pub const MENU_ITEMS: [&str; 4] = [
    "Play",
    "Play Next",
    "Reveal in file manager",
    "Remove from Playlist",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PromptKind {
    OpenFolder,
    AddPaths,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            Self::OpenFolder => " open folder ",
            Self::AddPaths => " add files or folder (separate with ;) ",
        }
    }
}

/// What keyboard input is currently routed to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Prompt {
        kind: PromptKind,
        input: String,
    },
    Menu {
        row: usize,
        cursor: usize,
    },
}

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("s", "stop");
    map.insert("h/l", "prev/next");
    // H/L and +/- are filled dynamically from config.
    map.insert("/", "search");
    map.insert("m", "menu");
    map.insert("o", "open folder");
    map.insert("a", "add files");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "j/k", "gg/G", "enter", "space/p", "s", "h/l", "H/L", "+/-", "/", "m", "o", "a", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!("[+/-] volume ±{}", controls.volume_step)),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Draw `image` with upper-half blocks: one cell holds two vertical pixels.
fn artwork_lines(image: &RgbImage, max_cols: u16, max_rows: u16) -> Vec<Line<'static>> {
    let cols = image.width().min(u32::from(max_cols));
    let rows = image.height().div_ceil(2).min(u32::from(max_rows));
    let rgb = |x: u32, y: u32| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Color::Rgb(r, g, b)
    };

    (0..rows)
        .map(|row| {
            let top = row * 2;
            let spans: Vec<Span<'static>> = (0..cols)
                .map(|x| {
                    let mut style = Style::default().fg(rgb(x, top));
                    if top + 1 < image.height() {
                        style = style.bg(rgb(x, top + 1));
                    }
                    Span::styled("▀", style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn status_text(status: EngineStatus, has_tracks: bool) -> &'static str {
    match status {
        EngineStatus::Playing => "Playing",
        EngineStatus::Paused => "Paused",
        EngineStatus::Stopped if has_tracks => "Stopped",
        EngineStatus::Stopped => "No songs",
    }
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw<E: AudioEngine, S: KeyValueStore>(frame: &mut Frame, app: &App<E, S>, mode: &InputMode) {
    let settings = app.settings();
    let art_rows = (settings.ui.artwork_size.div_ceil(2)).min(u32::from(u16::MAX)) as u16;
    let now_playing_height = art_rows.max(4) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(now_playing_height),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header: search text and row count
    let searching = *mode == InputMode::Search;
    let mut search = vec![Span::raw("Search: ")];
    if app.filter_query().is_empty() && !searching {
        search.push(Span::raw("(press /)").dim());
    } else {
        search.push(Span::raw(app.filter_query().to_string()).bold());
    }
    if searching {
        search.push(Span::raw("▏").slow_blink());
    }
    let header_block = Block::default()
        .borders(Borders::ALL)
        .title(settings.ui.header_text.as_str())
        .title_alignment(Alignment::Center);
    let header_inner = header_block.inner(chunks[0]);
    frame.render_widget(header_block, chunks[0]);
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .split(header_inner);
    frame.render_widget(Paragraph::new(Line::from(search)), header_cols[0]);
    frame.render_widget(
        Paragraph::new(app.count_label()).alignment(Alignment::Right),
        header_cols[1],
    );

    draw_now_playing(frame, app, chunks[1]);
    draw_tracks(frame, app, chunks[2]);

    let footer = Paragraph::new(controls_text(&settings.controls))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    match mode {
        InputMode::Prompt { kind, input } => draw_prompt(frame, *kind, input),
        InputMode::Menu { row, cursor } => draw_menu(frame, app, *row, *cursor, chunks[2]),
        InputMode::Normal | InputMode::Search => {}
    }

    // Notices sit above everything else until dismissed.
    if let Some(notice) = app.pending_notice() {
        let area = frame.area();
        let popup = centered_rect_sized(72, notice_height(&notice.message), area);
        frame.render_widget(Clear, popup);

        let (tag, color) = match notice.level {
            NoticeLevel::Info => ("info", Color::Cyan),
            NoticeLevel::Warning => ("warning", Color::Yellow),
        };
        let title = format!(" {tag}: {} (enter closes) ", notice.title);
        let body = Paragraph::new(notice.message.as_str())
            .block(padded(&title).border_style(Style::default().fg(color)))
            .wrap(Wrap { trim: false });
        frame.render_widget(body, popup);
    }
}

/// Rows for a notice popup: the message plus borders and padding.
fn notice_height(message: &str) -> u16 {
    u16::try_from(message.lines().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

fn draw_now_playing<E: AudioEngine, S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<E, S>,
    area: Rect,
) {
    let block = padded(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let now = app.now_playing();
    let art_cols = now.artwork.width().min(u32::from(inner.width / 3)) as u16;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(art_cols + 1), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(artwork_lines(&now.artwork, art_cols, cols[0].height)),
        cols[0],
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(cols[1]);

    frame.render_widget(Paragraph::new(now.title.as_str()).bold(), rows[0]);
    frame.render_widget(Paragraph::new(now.artist.as_str()), rows[1]);

    let status = status_text(app.status(), !app.playlist().is_empty());
    let folder = app
        .last_folder()
        .map(|p| format!("  •  {}", p.display()))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(format!("{status}  •  Vol {}%{folder}", app.volume())).dim(),
        rows[2],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(f64::from(app.seek_position()) / f64::from(SEEK_SCALE))
        .label(app.time_label());
    frame.render_widget(gauge, rows[3]);
}

fn draw_tracks<E: AudioEngine, S: KeyValueStore>(frame: &mut Frame, app: &App<E, S>, area: Rect) {
    let playlist = app.playlist();
    let visible = app.visible_rows();
    let marker = match app.status() {
        EngineStatus::Playing => "▶",
        EngineStatus::Paused => "‖",
        EngineStatus::Stopped => "•",
    };

    let rows: Vec<Row> = visible
        .iter()
        .filter_map(|&i| playlist.get(i).map(|t| (i, t)))
        .map(|(i, track)| {
            let mark = if playlist.current() == Some(i) { marker } else { "" };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(track.title.as_str()),
                Cell::from(track.artist.as_str()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ],
    )
    .header(Row::new(vec!["", "Title", "Artist"]).bold())
    .block(Block::default().borders(Borders::ALL).title(" tracks "))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    state.select(
        app.selected()
            .and_then(|sel| visible.iter().position(|&r| r == sel)),
    );
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_prompt(frame: &mut Frame, kind: PromptKind, input: &str) {
    let popup = centered_rect_sized(72, 3, frame.area());
    frame.render_widget(Clear, popup);
    let text = Line::from(vec![Span::raw(input.to_string()), Span::raw("▏").slow_blink()]);
    frame.render_widget(Paragraph::new(text).block(padded(kind.title())), popup);
}

fn draw_menu<E: AudioEngine, S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<E, S>,
    row: usize,
    cursor: usize,
    area: Rect,
) {
    let popup = centered_rect_sized(32, MENU_ITEMS.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);

    let title = app
        .playlist()
        .get(row)
        .map(|t| format!(" {} ", t.file_name()))
        .unwrap_or_else(|| " track ".to_string());
    let items: Vec<ListItem> = MENU_ITEMS.iter().map(|s| ListItem::new(*s)).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, popup, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn artwork_packs_two_pixel_rows_per_line() {
        let mut img = RgbImage::from_pixel(2, 3, Rgb([0, 0, 0]));
        img.put_pixel(0, 1, Rgb([255, 0, 0]));

        let lines = artwork_lines(&img, 10, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Rgb(255, 0, 0)));
        // Odd height: the last line has no lower pixel.
        assert_eq!(lines[1].spans[0].style.bg, None);
    }

    #[test]
    fn artwork_is_clipped_to_the_area() {
        let img = RgbImage::new(16, 16);
        let lines = artwork_lines(&img, 5, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.spans.len() == 5));
    }

    #[test]
    fn controls_text_uses_configured_steps() {
        let text = controls_text(&ControlsSettings {
            scrub_seconds: 10,
            volume_step: 2,
        });
        assert!(text.contains("[H/L] scrub -/+10s"));
        assert!(text.contains("[+/-] volume ±2"));
        assert!(text.starts_with("[j/k] up/down"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect_sized(100, 100, area);
        assert!(r.width <= 38 && r.height <= 8);
        assert_eq!(r.x, 1);
    }

    #[test]
    fn notice_height_saturates_on_huge_messages() {
        assert_eq!(notice_height("one\ntwo"), 6);

        let huge = "x\n".repeat(usize::from(u16::MAX) + 10);
        assert_eq!(notice_height(&huge), u16::MAX);
    }
}

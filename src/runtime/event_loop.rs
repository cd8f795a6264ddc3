use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioEngine;
use crate::session::KeyValueStore;
use crate::ui::{self, InputMode, MENU_ITEMS, PromptKind};

/// Rows skipped by PageUp / PageDown.
const PAGE: isize = 10;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Where key presses go right now.
    pub mode: InputMode,
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
    next_tick: Instant,
}

impl EventLoopState {
    pub fn new(tick: Duration) -> Self {
        Self {
            mode: InputMode::Normal,
            pending_gg: false,
            next_tick: Instant::now() + tick,
        }
    }
}

/// Main terminal event loop: draws, routes keys to the controller and drives
/// its timer. Returns `Ok(())` when the user quits.
pub fn run<E: AudioEngine, S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App<E, S>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(app.settings().playback.tick_ms.max(1));

    loop {
        terminal.draw(|f| ui::draw(f, app, &state.mode))?;

        let timeout = state.next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key_event(key, app, state) {
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        if now >= state.next_tick {
            app.tick();
            state.next_tick += tick;
            // Skip missed ticks after a stall.
            if state.next_tick <= now {
                state.next_tick = now + tick;
            }
        }
    }
}

/// Route one key press. Returns `true` when the app should quit.
fn handle_key_event<E: AudioEngine, S: KeyValueStore>(
    key: KeyEvent,
    app: &mut App<E, S>,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.pending_notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
        return false;
    }

    match std::mem::take(&mut state.mode) {
        InputMode::Normal => return handle_normal_key(key, app, state),
        InputMode::Search => state.mode = handle_search_key(key, app),
        InputMode::Prompt { kind, input } => state.mode = handle_prompt_key(key, app, kind, input),
        InputMode::Menu { row, cursor } => state.mode = handle_menu_key(key, app, row, cursor),
    }
    false
}

fn handle_normal_key<E: AudioEngine, S: KeyValueStore>(
    key: KeyEvent,
    app: &mut App<E, S>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    let controls = app.settings().controls.clone();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => state.mode = InputMode::Search,
        KeyCode::Char('o') => {
            let input = app
                .last_folder()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            state.mode = InputMode::Prompt {
                kind: PromptKind::OpenFolder,
                input,
            };
        }
        KeyCode::Char('a') => {
            state.mode = InputMode::Prompt {
                kind: PromptKind::AddPaths,
                input: String::new(),
            };
        }
        KeyCode::Char('m') => {
            if let Some(row) = app.selected() {
                state.mode = InputMode::Menu { row, cursor: 0 };
            }
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::PageDown => app.move_selection(PAGE),
        KeyCode::PageUp => app.move_selection(-PAGE),
        KeyCode::Enter => {
            if let Some(row) = app.selected() {
                app.play_row(row);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('l') => app.next(),
        KeyCode::Char('h') => app.prev(),
        KeyCode::Char('L') | KeyCode::Right => app.seek_by(scrub_step(&controls)),
        KeyCode::Char('H') | KeyCode::Left => app.seek_by(-scrub_step(&controls)),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_volume(i16::from(controls.volume_step));
        }
        KeyCode::Char('-') => app.adjust_volume(-i16::from(controls.volume_step)),
        _ => {}
    }
    false
}

fn scrub_step(controls: &crate::config::ControlsSettings) -> i64 {
    i64::try_from(controls.scrub_seconds).unwrap_or(i64::MAX)
}

fn handle_search_key<E: AudioEngine, S: KeyValueStore>(
    key: KeyEvent,
    app: &mut App<E, S>,
) -> InputMode {
    match key.code {
        KeyCode::Esc => {
            app.set_filter("");
            return InputMode::Normal;
        }
        KeyCode::Enter => return InputMode::Normal,
        KeyCode::Down => app.move_selection(1),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(1)
        }
        KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(-1)
        }
        KeyCode::Backspace => {
            let mut query = app.filter_query().to_string();
            query.pop();
            app.set_filter(&query);
        }
        KeyCode::Char(c) if !c.is_control() => {
            let mut query = app.filter_query().to_string();
            query.push(c);
            app.set_filter(&query);
        }
        _ => {}
    }
    InputMode::Search
}

fn handle_prompt_key<E: AudioEngine, S: KeyValueStore>(
    key: KeyEvent,
    app: &mut App<E, S>,
    kind: PromptKind,
    mut input: String,
) -> InputMode {
    match key.code {
        KeyCode::Esc => return InputMode::Normal,
        KeyCode::Enter => {
            let paths = parse_paths(&input);
            match kind {
                PromptKind::OpenFolder => {
                    if let Some(dir) = paths.into_iter().next() {
                        app.load_folder(&dir);
                    }
                }
                PromptKind::AddPaths => app.add_paths(&paths),
            }
            return InputMode::Normal;
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => input.push(c),
        _ => {}
    }
    InputMode::Prompt { kind, input }
}

fn handle_menu_key<E: AudioEngine, S: KeyValueStore>(
    key: KeyEvent,
    app: &mut App<E, S>,
    row: usize,
    cursor: usize,
) -> InputMode {
    let last = MENU_ITEMS.len() - 1;
    let cursor = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => return InputMode::Normal,
        KeyCode::Char('j') | KeyCode::Down => (cursor + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => cursor.saturating_sub(1),
        KeyCode::Enter => {
            match cursor {
                0 => app.play_row(row),
                1 => app.play_next(row),
                2 => app.reveal_row(row),
                _ => app.remove_row(row),
            }
            return InputMode::Normal;
        }
        _ => cursor,
    };
    InputMode::Menu { row, cursor }
}

/// Split prompt input on `;` into paths, expanding a leading `~`.
fn parse_paths(input: &str) -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    split_paths(input, home.as_deref())
}

fn split_paths(input: &str, home: Option<&Path>) -> Vec<PathBuf> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| expand_home(s, home))
        .collect()
}

fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_input_splits_on_semicolons() {
        let paths = split_paths(" /a/b.wav ;; /c d/e.ogg;", None);
        assert_eq!(
            paths,
            vec![PathBuf::from("/a/b.wav"), PathBuf::from("/c d/e.ogg")]
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = Path::new("/home/me");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/me"));
        assert_eq!(
            expand_home("~/Music", Some(home)),
            PathBuf::from("/home/me/Music")
        );
        assert_eq!(expand_home("~/Music", None), PathBuf::from("~/Music"));
    }

    #[test]
    fn relative_and_absolute_paths_are_kept() {
        let home = Some(Path::new("/home/me"));
        assert_eq!(expand_home("music", home), PathBuf::from("music"));
        assert_eq!(expand_home("/srv/~x", home), PathBuf::from("/srv/~x"));
    }
}

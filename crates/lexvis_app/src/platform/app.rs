use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use lexvis_core::{
    update, visual_chips, AppState, Effect, Msg, RawTreeRenderer, RawView, ResultTab,
};
use lexvis_engine::load_grammar_artifact;
use lexvis_logging::{lexvis_info, lexvis_warn};
use ratatui::prelude::{CrosstermBackend, Terminal};

use super::config::Settings;
use super::effects::EffectRunner;
use super::ui;
use super::ui::raw_viewer::RawViewer;

const TICK_INTERVAL: Duration = Duration::from_millis(75);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app(settings: &Settings, initial: Vec<Msg>) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(settings.client.clone(), msg_tx.clone())?;

    // Background tick to age notices.
    thread::spawn(move || {
        while msg_tx.send(Msg::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    enable_raw_mode().context("failed to enable raw mode")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new();
    let mut startup = vec![Msg::AppStarted];
    startup.extend(initial);
    for msg in startup {
        runner.enqueue(app.dispatch(msg));
    }

    let result = event_loop(&mut terminal, &mut app, &runner, &msg_rx);

    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;
    lexvis_info!("UI closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let mut needs_draw = true;
    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            runner.enqueue(app.dispatch(msg));
        }

        if app.consume_dirty() || needs_draw {
            terminal.draw(|frame| ui::render::render(frame, app))?;
            needs_draw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        KeyOutcome::Quit => return Ok(()),
                        KeyOutcome::Dispatch(msg) => runner.enqueue(app.dispatch(msg)),
                        KeyOutcome::Handled => {}
                    }
                    needs_draw = true;
                }
                Event::Resize(_, _) => needs_draw = true,
                _ => {}
            }
        }
    }
}

/// Which panel receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Grammar,
    Input,
    Results,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Grammar => Focus::Input,
            Focus::Input => Focus::Results,
            Focus::Results => Focus::Grammar,
        }
    }

    fn previous(self) -> Focus {
        match self {
            Focus::Grammar => Focus::Results,
            Focus::Input => Focus::Grammar,
            Focus::Results => Focus::Input,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Dispatch(Msg),
    Handled,
}

/// Reducer state plus the terminal-only bits: focus, path prompt and cursors.
#[derive(Debug, Default)]
pub struct App {
    state: AppState,
    focus: Focus,
    grammar_path: String,
    chip_cursor: usize,
    raw_viewer: RawViewer,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn grammar_path(&self) -> &str {
        &self.grammar_path
    }

    pub fn chip_cursor(&self) -> usize {
        self.chip_cursor
    }

    pub fn raw_viewer(&self) -> &RawViewer {
        &self.raw_viewer
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let revision = self.state.stream_revision();
        self.raw_viewer.sync(revision);
        if self.chip_cursor >= self.state.tokens().len() {
            self.chip_cursor = 0;
        }
        effects
    }

    /// Hover text for the chip under the cursor, when the visual view has focus.
    pub fn hover_text(&self) -> Option<String> {
        if self.focus != Focus::Results || self.state.active_tab() != ResultTab::Visual {
            return None;
        }
        let token = self.state.tokens().get(self.chip_cursor)?;
        visual_chips(std::slice::from_ref(token))
            .pop()
            .map(|chip| chip.hover)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeyOutcome::Quit,
                KeyCode::Char('t') => KeyOutcome::Dispatch(Msg::SubmitRequested),
                KeyCode::Char('x') => KeyOutcome::Dispatch(Msg::ArtifactCleared),
                _ => KeyOutcome::Handled,
            };
        }

        match key.code {
            KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::F(5) => KeyOutcome::Dispatch(Msg::SubmitRequested),
            KeyCode::F(2) => KeyOutcome::Dispatch(Msg::TabChanged(ResultTab::Visual)),
            KeyCode::F(3) => KeyOutcome::Dispatch(Msg::TabChanged(ResultTab::RawData)),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                KeyOutcome::Handled
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                KeyOutcome::Handled
            }
            _ => match self.focus {
                Focus::Grammar => self.handle_grammar_key(key),
                Focus::Input => self.handle_input_key(key),
                Focus::Results => self.handle_results_key(key),
            },
        }
    }

    fn handle_grammar_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char(ch) => {
                self.grammar_path.push(ch);
                KeyOutcome::Handled
            }
            KeyCode::Backspace => {
                self.grammar_path.pop();
                KeyOutcome::Handled
            }
            KeyCode::Enter => {
                let path = self.grammar_path.trim().to_string();
                if path.is_empty() {
                    return KeyOutcome::Handled;
                }
                match load_grammar_artifact(Path::new(&path)) {
                    Ok(artifact) => {
                        self.grammar_path.clear();
                        KeyOutcome::Dispatch(Msg::ArtifactSelected(artifact))
                    }
                    Err(err) => {
                        lexvis_warn!("Could not stage grammar: {}", err);
                        KeyOutcome::Dispatch(Msg::ArtifactUnreadable {
                            path,
                            reason: err.to_string(),
                        })
                    }
                }
            }
            _ => KeyOutcome::Handled,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let mut text = self.state.input_text().to_string();
        match key.code {
            KeyCode::Char(ch) => text.push(ch),
            KeyCode::Enter => text.push('\n'),
            KeyCode::Backspace => {
                if text.pop().is_none() {
                    return KeyOutcome::Handled;
                }
            }
            _ => return KeyOutcome::Handled,
        }
        KeyOutcome::Dispatch(Msg::InputEdited(text))
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('1') => return KeyOutcome::Dispatch(Msg::TabChanged(ResultTab::Visual)),
            KeyCode::Char('2') => {
                return KeyOutcome::Dispatch(Msg::TabChanged(ResultTab::RawData))
            }
            _ => {}
        }

        let token_count = self.state.tokens().len();
        if token_count == 0 {
            return KeyOutcome::Handled;
        }

        match self.state.active_tab() {
            ResultTab::Visual => match key.code {
                KeyCode::Left => self.chip_cursor = self.chip_cursor.saturating_sub(1),
                KeyCode::Right => self.chip_cursor = (self.chip_cursor + 1).min(token_count - 1),
                KeyCode::Home => self.chip_cursor = 0,
                KeyCode::End => self.chip_cursor = token_count - 1,
                _ => {}
            },
            ResultTab::RawData => {
                if self.state.raw_view() != RawView::Loaded {
                    return KeyOutcome::Handled;
                }
                let renderer = RawTreeRenderer::acquire();
                let lines = self.raw_viewer.lines(renderer, self.state.tokens());
                match key.code {
                    KeyCode::Up => self.raw_viewer.move_up(),
                    KeyCode::Down => self.raw_viewer.move_down(lines.len()),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        self.raw_viewer.toggle(&lines);
                        let count = self.raw_viewer.lines(renderer, self.state.tokens()).len();
                        self.raw_viewer.clamp(count);
                    }
                    _ => {}
                }
            }
        }
        KeyOutcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lexvis_core::{GrammarArtifact, Token};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            if let KeyOutcome::Dispatch(msg) = app.handle_key(press(KeyCode::Char(ch))) {
                app.dispatch(msg);
            }
        }
    }

    fn token(text: &str, column: i64) -> Token {
        Token {
            text: text.to_string(),
            token_type: "ID".to_string(),
            line: 1,
            column,
            channel: 0,
            token_index: column,
            start: column,
            stop: column + text.len() as i64 - 1,
        }
    }

    fn app_with_results() -> App {
        let mut app = App::new();
        app.dispatch(Msg::ArtifactSelected(GrammarArtifact::new(
            "grammar.g4",
            "text/plain",
            b"lexer grammar G;".to_vec(),
        )));
        app.dispatch(Msg::InputEdited("hello world".to_string()));
        let effects = app.dispatch(Msg::SubmitRequested);
        assert_eq!(effects.len(), 1);
        app.dispatch(Msg::SubmitSucceeded {
            request_id: 1,
            tokens: vec![token("hello", 0), token("world", 6)],
        });
        app
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = App::new();
        assert_eq!(app.focus(), Focus::Grammar);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Input);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Results);
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn typing_in_input_replaces_the_buffer() {
        let mut app = App::new();
        app.handle_key(press(KeyCode::Tab));
        type_text(&mut app, "ab");
        let outcome = app.handle_key(press(KeyCode::Backspace));
        assert_eq!(outcome, KeyOutcome::Dispatch(Msg::InputEdited("a".to_string())));
        let outcome = app.handle_key(press(KeyCode::Enter));
        assert_eq!(outcome, KeyOutcome::Dispatch(Msg::InputEdited("ab\n".to_string())));
    }

    #[test]
    fn enter_in_grammar_prompt_stages_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Hello.g4");
        fs::write(&path, "lexer grammar Hello;").unwrap();

        let mut app = App::new();
        type_text(&mut app, &path.display().to_string());
        match app.handle_key(press(KeyCode::Enter)) {
            KeyOutcome::Dispatch(Msg::ArtifactSelected(artifact)) => {
                assert_eq!(artifact.name(), "Hello.g4");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(app.grammar_path().is_empty());
    }

    #[test]
    fn enter_with_missing_file_reports_unreadable() {
        let mut app = App::new();
        type_text(&mut app, "/no/such/grammar.g4");
        let outcome = app.handle_key(press(KeyCode::Enter));
        assert!(matches!(
            outcome,
            KeyOutcome::Dispatch(Msg::ArtifactUnreadable { .. })
        ));
        assert_eq!(app.grammar_path(), "/no/such/grammar.g4");
    }

    #[test]
    fn control_keys_submit_clear_and_quit() {
        let mut app = App::new();
        assert_eq!(app.handle_key(ctrl('t')), KeyOutcome::Dispatch(Msg::SubmitRequested));
        assert_eq!(app.handle_key(ctrl('x')), KeyOutcome::Dispatch(Msg::ArtifactCleared));
        assert_eq!(app.handle_key(ctrl('c')), KeyOutcome::Quit);
        assert_eq!(app.handle_key(press(KeyCode::Esc)), KeyOutcome::Quit);
    }

    #[test]
    fn chip_cursor_moves_and_exposes_hover() {
        let mut app = app_with_results();
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Results);
        assert_eq!(
            app.hover_text().as_deref(),
            Some("Type: ID\nLine: 1, Column: 0")
        );

        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.chip_cursor(), 1);
        assert_eq!(
            app.hover_text().as_deref(),
            Some("Type: ID\nLine: 1, Column: 6")
        );
    }

    #[test]
    fn raw_tab_keys_toggle_nodes_once_loaded() {
        let mut app = app_with_results();
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));

        let outcome = app.handle_key(press(KeyCode::Char('2')));
        assert_eq!(outcome, KeyOutcome::Dispatch(Msg::TabChanged(ResultTab::RawData)));
        let effects = app.dispatch(Msg::TabChanged(ResultTab::RawData));
        assert_eq!(effects, vec![Effect::LoadRawView]);

        // Not loaded yet: navigation is ignored.
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.raw_viewer().cursor(), 0);

        app.dispatch(Msg::RawViewLoaded);
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Enter));
        let lines = app
            .raw_viewer()
            .lines(RawTreeRenderer::acquire(), app.state().tokens());
        assert_eq!(lines[1].text, "0: { 8 items");
    }
}

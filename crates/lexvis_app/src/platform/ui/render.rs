//! Frame layout.
//!
//! - Title bar (1 line) with the service status
//! - Grammar File panel (staged summary and path prompt)
//! - Input Text panel
//! - Results panel with Visual / Raw Data tabs, only once tokens exist
//! - Status line: notice, else hover text, else key help

use lexvis_core::{
    AppViewModel, NoticeLevel, RawTreeRenderer, RawView, ResultTab, ServiceStatus, TreeLineKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use super::chips::styled_lines;
use crate::platform::app::{App, Focus};

const MIN_TERMINAL_WIDTH: u16 = 40;
const GRAMMAR_PANEL_HEIGHT: u16 = 4;
const INPUT_PANEL_HEIGHT: u16 = 8;
const KEY_HELP: &str = "Tab focus | Ctrl+T tokenize | F2/F3 tabs | Ctrl+X clear grammar | Esc quit";

pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();
    if size.width < MIN_TERMINAL_WIDTH {
        render_error_too_narrow(frame, size);
        return;
    }

    let view = app.state().view();
    let input_height = if view.has_results() {
        Constraint::Length(INPUT_PANEL_HEIGHT)
    } else {
        Constraint::Min(3)
    };
    let results_height = if view.has_results() {
        Constraint::Min(4)
    } else {
        Constraint::Length(0)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(GRAMMAR_PANEL_HEIGHT),
            input_height,
            results_height,
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(frame, chunks[0], &view);
    render_grammar_panel(frame, chunks[1], app, &view);
    render_input_panel(frame, chunks[2], app, &view);
    if view.has_results() {
        render_results_panel(frame, chunks[3], app, &view);
    }
    render_status_line(frame, chunks[4], app, &view);
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too narrow: {} < {} chars",
        area.width, MIN_TERMINAL_WIDTH
    );
    let paragraph =
        Paragraph::new(msg).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let service = match &view.service {
        ServiceStatus::Unknown => "service: checking".to_string(),
        ServiceStatus::Online { message: Some(message) } => format!("service: online ({message})"),
        ServiceStatus::Online { message: None } => "service: online".to_string(),
        ServiceStatus::Offline { .. } => "service: offline".to_string(),
    };
    let title = format!("lexvis:: token visualizer  [{service}]");
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    let title = if focused {
        format!("{title} [FOCUSED]")
    } else {
        title.to_string()
    };
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn render_grammar_panel(frame: &mut Frame, area: Rect, app: &App, view: &AppViewModel) {
    let focused = app.focus() == Focus::Grammar;
    let block = panel("Grammar File", focused);

    let staged = match &view.grammar {
        Some(summary) => Line::from(vec![
            Span::styled(summary.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" ({} bytes, {})", summary.size, summary.media_type)),
        ]),
        None => Line::styled(
            "No grammar staged (Supports .g4 ANTLR grammar files)",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let mut prompt = format!("Open: {}", app.grammar_path());
    if focused {
        prompt.push('_');
    }

    let paragraph = Paragraph::new(vec![staged, Line::raw(prompt)]).block(block);
    frame.render_widget(paragraph, area);
}

fn render_input_panel(frame: &mut Frame, area: Rect, app: &App, view: &AppViewModel) {
    let focused = app.focus() == Focus::Input;
    let hint = if view.in_flight {
        Span::styled(" Tokenizing… ", Style::default().fg(Color::Yellow))
    } else if view.can_submit {
        Span::styled(" Ctrl+T to tokenize ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" Tokenize disabled ", Style::default().fg(Color::DarkGray))
    };
    let block = panel("Input Text", focused).title_bottom(Line::from(hint).right_aligned());

    let inner = block.inner(area);
    let mut text = view.input_text.clone();
    if focused {
        text.push('_');
    }
    // Keep the end of the buffer in view while typing.
    let line_count = text.lines().count().max(1) + usize::from(text.ends_with('\n'));
    let scroll = line_count.saturating_sub(inner.height as usize);

    let paragraph = Paragraph::new(text)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_results_panel(frame: &mut Frame, area: Rect, app: &App, view: &AppViewModel) {
    let focused = app.focus() == Focus::Results;
    let block = panel(&format!("Results ({} tokens)", view.token_count), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let selected = match view.active_tab {
        ResultTab::Visual => 0,
        ResultTab::RawData => 1,
    };
    let tabs = Tabs::new(vec![ResultTab::Visual.label(), ResultTab::RawData.label()])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    match view.active_tab {
        ResultTab::Visual => render_visual(frame, chunks[1], app, view, focused),
        ResultTab::RawData => render_raw(frame, chunks[1], app, view, focused),
    }
}

fn render_visual(frame: &mut Frame, area: Rect, app: &App, view: &AppViewModel, focused: bool) {
    let cursor = focused.then_some(app.chip_cursor());
    let (lines, cursor_line) = styled_lines(&view.chips, area.width as usize, cursor);
    let scroll = cursor_line
        .map(|line| (line + 2).saturating_sub(area.height as usize))
        .unwrap_or(0);
    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
}

fn render_raw(frame: &mut Frame, area: Rect, app: &App, view: &AppViewModel, focused: bool) {
    if view.raw_view == RawView::NotLoaded {
        let loading =
            Paragraph::new("Loading raw view…").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    }

    let viewer = app.raw_viewer();
    let tree = viewer.lines(RawTreeRenderer::acquire(), app.state().tokens());
    let lines: Vec<Line> = tree
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let mut style = match line.kind {
                TreeLineKind::Collapsed => Style::default().fg(Color::Cyan),
                TreeLineKind::Open | TreeLineKind::Close => Style::default().fg(Color::Blue),
                TreeLineKind::Leaf => Style::default(),
            };
            if focused && index == viewer.cursor() {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Line::styled(format!("{}{}", "  ".repeat(line.depth), line.text), style)
        })
        .collect();

    let scroll = (viewer.cursor() + 1).saturating_sub(area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App, view: &AppViewModel) {
    let line = if let Some(notice) = &view.notice {
        let color = match notice.level {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        Line::styled(notice.text.clone(), Style::default().fg(color))
    } else if let Some(hover) = app.hover_text() {
        Line::raw(hover.replace('\n', " | "))
    } else {
        Line::styled(KEY_HELP, Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(line), area);
}

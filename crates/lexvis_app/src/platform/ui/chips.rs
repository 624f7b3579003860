//! Chip layout for the visual view.
//!
//! Chips flow left to right and wrap into rows. Each row is drawn as two
//! lines: lexemes on top, type labels underneath.

use std::ops::Range;

use lexvis_core::TokenChip;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const CHIP_GAP: usize = 1;
/// Columns around the label in the styled view (one space each side).
const STYLED_PADDING: usize = 2;
/// Columns around the label in plain text (`[ ` and ` ]`).
const PLAIN_PADDING: usize = 4;

/// Splits chips into rows that fit `width` columns. A chip wider than the
/// row gets a row of its own.
pub fn layout_rows(chips: &[TokenChip], width: usize, padding: usize) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (index, chip) in chips.iter().enumerate() {
        let cell = chip.width() + padding;
        let needed = if index == start { cell } else { used + CHIP_GAP + cell };
        if index > start && needed > width {
            rows.push(start..index);
            start = index;
            used = cell;
        } else {
            used = needed;
        }
    }
    if start < chips.len() {
        rows.push(start..chips.len());
    }
    rows
}

/// Plain-text rendering used by `--print`.
pub fn plain_lines(chips: &[TokenChip], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for row in layout_rows(chips, width, PLAIN_PADDING) {
        let cells = &chips[row];
        let labels: Vec<String> = cells
            .iter()
            .map(|chip| format!("[ {:<w$} ]", chip.label, w = chip.width()))
            .collect();
        let types: Vec<String> = cells
            .iter()
            .map(|chip| format!("[ {:<w$} ]", chip.type_label, w = chip.width()))
            .collect();
        lines.push(labels.join(" ").trim_end().to_string());
        lines.push(types.join(" ").trim_end().to_string());
    }
    lines
}

/// Styled rendering for the terminal. Returns the lines and the index of the
/// line holding the cursor chip, so the caller can scroll to it.
pub fn styled_lines(
    chips: &[TokenChip],
    width: usize,
    cursor: Option<usize>,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = Vec::new();
    let mut cursor_line = None;
    let max_label = width.saturating_sub(STYLED_PADDING).max(1);

    for row in layout_rows(chips, width, STYLED_PADDING) {
        let mut top = Vec::new();
        let mut bottom = Vec::new();
        for index in row.clone() {
            let chip = &chips[index];
            let w = chip.width().min(max_label);
            let hovered = cursor == Some(index);
            if hovered {
                cursor_line = Some(lines.len());
            }
            if index != row.start {
                top.push(Span::raw(" ".repeat(CHIP_GAP)));
                bottom.push(Span::raw(" ".repeat(CHIP_GAP)));
            }
            let (label_style, type_style) = chip_styles(chip, hovered);
            top.push(Span::styled(
                format!(" {:<w$} ", truncate(&chip.label, w)),
                label_style,
            ));
            bottom.push(Span::styled(
                format!(" {:<w$} ", truncate(&chip.type_label, w)),
                type_style,
            ));
        }
        lines.push(Line::from(top));
        lines.push(Line::from(bottom));
    }
    (lines, cursor_line)
}

fn chip_styles(chip: &TokenChip, hovered: bool) -> (Style, Style) {
    let bg = if hovered { Color::Blue } else { Color::DarkGray };
    let mut label = Style::default()
        .fg(Color::White)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut type_label = Style::default().fg(Color::Gray).bg(bg);
    if chip.hidden_channel {
        label = label.add_modifier(Modifier::DIM);
        type_label = type_label.add_modifier(Modifier::DIM);
    }
    (label, type_label)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

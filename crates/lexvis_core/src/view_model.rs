use crate::{ArtifactSummary, Notice, RawView, ResultTab, ServiceStatus, SubmitError, Token};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub grammar: Option<ArtifactSummary>,
    pub input_text: String,
    pub token_count: usize,
    pub chips: Vec<TokenChip>,
    pub stream_revision: u64,
    pub in_flight: bool,
    pub can_submit: bool,
    pub active_tab: ResultTab,
    pub raw_view: RawView,
    pub notice: Option<Notice>,
    pub last_error: Option<SubmitError>,
    pub service: ServiceStatus,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn has_results(&self) -> bool {
        self.token_count > 0
    }
}

/// One token as shown in the visual view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenChip {
    pub label: String,
    pub type_label: String,
    /// Shown while the chip is hovered.
    pub hover: String,
    pub hidden_channel: bool,
}

impl TokenChip {
    /// Display width in columns: the wider of lexeme and type label.
    pub fn width(&self) -> usize {
        self.label
            .chars()
            .count()
            .max(self.type_label.chars().count())
    }
}

/// Builds the chip sequence for a token stream, in stream order.
pub fn visual_chips(tokens: &[Token]) -> Vec<TokenChip> {
    tokens
        .iter()
        .map(|token| TokenChip {
            label: display_lexeme(&token.text),
            type_label: token.token_type.clone(),
            hover: format!(
                "Type: {}\nLine: {}, Column: {}",
                token.token_type, token.line, token.column
            ),
            hidden_channel: !token.is_default_channel(),
        })
        .collect()
}

/// Escapes control characters so a lexeme fits on one line.
pub fn display_lexeme(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => out.extend(ch.escape_unicode()),
            ch => out.push(ch),
        }
    }
    out
}

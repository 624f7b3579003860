use crate::view_model::{visual_chips, AppViewModel};
use crate::{GrammarArtifact, Notice, SubmitError, Token};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Visual,
    RawData,
}

impl ResultTab {
    pub fn label(self) -> &'static str {
        match self {
            ResultTab::Visual => "Visual",
            ResultTab::RawData => "Raw Data",
        }
    }
}

/// Raw tree renderer availability. Resolves once per state lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawView {
    #[default]
    NotLoaded,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Online {
        message: Option<String>,
    },
    Offline {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    artifact: Option<GrammarArtifact>,
    input_text: String,
    tokens: Vec<Token>,
    stream_revision: u64,
    in_flight: bool,
    pending_request: Option<RequestId>,
    last_request_id: RequestId,
    active_tab: ResultTab,
    raw_view: RawView,
    notice: Option<Notice>,
    last_error: Option<SubmitError>,
    service: ServiceStatus,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            grammar: self.artifact.as_ref().map(GrammarArtifact::summary),
            input_text: self.input_text.clone(),
            token_count: self.tokens.len(),
            chips: visual_chips(&self.tokens),
            stream_revision: self.stream_revision,
            in_flight: self.in_flight,
            can_submit: self.can_submit(),
            active_tab: self.active_tab,
            raw_view: self.raw_view,
            notice: self.notice.clone(),
            last_error: self.last_error.clone(),
            service: self.service.clone(),
            dirty: self.dirty,
        }
    }

    pub fn artifact(&self) -> Option<&GrammarArtifact> {
        self.artifact.as_ref()
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn stream_revision(&self) -> u64 {
        self.stream_revision
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending_request
    }

    pub fn active_tab(&self) -> ResultTab {
        self.active_tab
    }

    pub fn raw_view(&self) -> RawView {
        self.raw_view
    }

    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn can_submit(&self) -> bool {
        self.artifact.is_some() && !self.input_text.trim().is_empty() && !self.in_flight
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn stage_artifact(&mut self, artifact: GrammarArtifact) {
        self.artifact = Some(artifact);
        self.mark_dirty();
    }

    pub(crate) fn clear_artifact(&mut self) -> bool {
        let had_artifact = self.artifact.take().is_some();
        if had_artifact {
            self.mark_dirty();
        }
        had_artifact
    }

    pub(crate) fn set_input_text(&mut self, text: String) {
        if self.input_text != text {
            self.input_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = true;
        self.pending_request = Some(request_id);
        self.last_error = None;
        self.mark_dirty();
        request_id
    }

    /// Clears the in-flight state if `request_id` is the pending request.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.pending_request != Some(request_id) {
            return false;
        }
        self.pending_request = None;
        self.in_flight = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn replace_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.stream_revision += 1;
        self.mark_dirty();
    }

    pub(crate) fn set_active_tab(&mut self, tab: ResultTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.mark_dirty();
        }
    }

    pub(crate) fn mark_raw_view_loaded(&mut self) {
        if self.raw_view == RawView::NotLoaded {
            self.raw_view = RawView::Loaded;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn record_error(&mut self, error: SubmitError) {
        self.set_notice(Notice::error(error.user_message()));
        self.last_error = Some(error);
    }

    pub(crate) fn age_notice(&mut self) {
        if let Some(notice) = self.notice.as_mut() {
            if !notice.tick() {
                self.notice = None;
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn set_service(&mut self, status: ServiceStatus) {
        if self.service != status {
            self.service = status;
            self.mark_dirty();
        }
    }
}

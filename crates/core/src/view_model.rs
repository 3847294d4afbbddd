//! Summarization view-model: user input, one backend round trip, and the
//! derived output a front end renders.
//!
//! State lives in a `watch` channel. Mutations are short synchronous
//! sections and nothing is locked across the backend call, so observers see
//! `loading` for the whole flight. Overlapping `summarize` calls are not
//! sequenced; whichever settles last overwrites the result fields.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    client::SummarizeApi,
    clipboard::Clipboard,
    markdown::MarkdownRenderer,
    types::{SummarizeRequest, SummarizeResponse},
};

pub const MISSING_VIDEO_ID_MESSAGE: &str = "Please enter at least one video ID.";
pub const CONNECTION_FAILED_MESSAGE: &str = "Could not connect to the backend.";
pub const TRANSCRIPT_COPIED_MESSAGE: &str = "Transcript copied to clipboard!";
pub const TRANSCRIPT_COPY_FAILED_MESSAGE: &str = "Failed to copy transcript.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub video_id: String,
    /// Space-separated language codes, in preference order
    pub languages: String,
    pub translate: String,
    pub summary: String,
    pub transcript: String,
    pub error: String,
    pub loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            video_id: String::new(),
            languages: "en".to_string(),
            translate: "en".to_string(),
            summary: String::new(),
            transcript: String::new(),
            error: String::new(),
            loading: false,
        }
    }
}

/// Blocking user acknowledgment, e.g. an alert box
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

pub struct SummaryViewModel {
    state: watch::Sender<ViewState>,
    api: Arc<dyn SummarizeApi>,
    renderer: Arc<dyn MarkdownRenderer>,
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
}

impl SummaryViewModel {
    pub fn new(
        api: Arc<dyn SummarizeApi>,
        renderer: Arc<dyn MarkdownRenderer>,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_state(ViewState::default(), api, renderer, clipboard, notifier)
    }

    pub fn with_state(
        initial: ViewState,
        api: Arc<dyn SummarizeApi>,
        renderer: Arc<dyn MarkdownRenderer>,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            api,
            renderer,
            clipboard,
            notifier,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn set_video_id(&self, video_id: impl Into<String>) {
        let video_id = video_id.into();
        self.state.send_modify(|s| s.video_id = video_id);
    }

    pub fn set_languages(&self, languages: impl Into<String>) {
        let languages = languages.into();
        self.state.send_modify(|s| s.languages = languages);
    }

    pub fn set_translate(&self, translate: impl Into<String>) {
        let translate = translate.into();
        self.state.send_modify(|s| s.translate = translate);
    }

    /// The summary rendered by the markdown collaborator, recomputed on every call
    pub fn parsed_summary(&self) -> String {
        let state = self.state.borrow();
        self.renderer.render(&state.summary)
    }

    pub async fn summarize(&self) {
        let mut request = None;
        self.state.send_modify(|s| {
            s.summary.clear();
            s.transcript.clear();
            s.error.clear();

            if s.video_id.trim().is_empty() {
                s.error = MISSING_VIDEO_ID_MESSAGE.to_string();
            } else {
                request = Some(SummarizeRequest::single(&s.video_id, &s.languages, &s.translate));
            }
        });
        let Some(request) = request else {
            return;
        };
        let video_id = request.video_ids[0].clone();

        self.state.send_modify(|s| s.loading = true);
        let _in_flight = scopeguard::guard((), |_| {
            self.state.send_modify(|s| s.loading = false);
        });

        tracing::debug!(video_id = %video_id, "dispatching summarize request");
        match self.api.summarize(&request).await {
            Ok(response) => self.state.send_modify(|s| apply_response(s, &video_id, response)),
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "summarize request failed");
                self.state
                    .send_modify(|s| s.error = CONNECTION_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Copy the current transcript and acknowledge the outcome
    pub async fn copy_transcript(&self) -> CopyOutcome {
        let transcript = self.state.borrow().transcript.clone();
        match self.clipboard.write_text(&transcript).await {
            Ok(()) => {
                self.notifier.alert(TRANSCRIPT_COPIED_MESSAGE);
                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::warn!(error = %e, "transcript copy failed");
                self.notifier.alert(TRANSCRIPT_COPY_FAILED_MESSAGE);
                CopyOutcome::Failed
            }
        }
    }
}

fn apply_response(state: &mut ViewState, video_id: &str, response: SummarizeResponse) {
    if let SummarizeResponse::Failed { error } = response {
        state.error = error;
        return;
    }

    let entry = response.entry(video_id).cloned().unwrap_or_default();
    state.summary = entry.summary.unwrap_or_default();
    state.transcript = entry.transcript.unwrap_or_default();
    state.error = entry.error.unwrap_or_default();
}

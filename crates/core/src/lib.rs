//! Vidsum Core Library
//!
//! Summarize YouTube videos from their transcripts: the `POST /summarize`
//! backend, the transcript and LLM pipeline behind it, and the client-side
//! view-model that talks to it.

pub mod cache;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod pipeline;
pub mod provider;
pub mod server;
pub mod transcript;
pub mod types;
pub mod video_id;
pub mod view_model;

// Re-export commonly used items at crate root
pub use client::{HttpApi, SummarizeApi};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use config::Config;
pub use error::{Result, VidsumError};
pub use markdown::{HtmlRenderer, MarkdownRenderer};
pub use pipeline::{LlmSummarizer, Summarizer, summarize_video};
pub use provider::{Provider, ProviderError};
pub use server::{AppState, build_router, serve};
pub use transcript::{TranscriptSource, YtDlpTranscripts};
pub use types::{Segment, SummarizeRequest, SummarizeResponse, Transcript, VideoResult};
pub use video_id::extract_video_id;
pub use view_model::{CopyOutcome, Notifier, SummaryViewModel, ViewState};

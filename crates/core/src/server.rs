//! HTTP backend answering `POST /summarize`.

use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{Json, Router, extract::State, routing::post};
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::{
    config::Config,
    error::Result,
    pipeline::{LlmSummarizer, Summarizer, summarize_to_result},
    provider::Provider,
    transcript::{TranscriptSource, YtDlpTranscripts},
    types::{SummarizeRequest, SummarizeResponse},
    video_id::extract_video_id,
};

pub const NO_VIDEO_ID_MESSAGE: &str = "No video ID provided.";

#[derive(Clone)]
pub struct AppState {
    transcripts: Arc<dyn TranscriptSource>,
    summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(transcripts: Arc<dyn TranscriptSource>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            transcripts,
            summarizer,
        }
    }

    /// State backed by yt-dlp and the configured LLM provider
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = Provider::from_config(&config.llm)?;
        Ok(Self::new(
            Arc::new(YtDlpTranscripts::new(config.cache_dir())),
            Arc::new(LlmSummarizer::new(provider)),
        ))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize_handler))
        .with_state(state)
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    let request_id = Uuid::new_v4();
    if request.video_ids.is_empty() {
        tracing::debug!(%request_id, "rejecting request without video ids");
        return Json(SummarizeResponse::Failed {
            error: NO_VIDEO_ID_MESSAGE.to_string(),
        });
    }

    tracing::info!(
        %request_id,
        videos = request.video_ids.len(),
        languages = ?request.languages,
        translate = %request.translate,
        "summarize request"
    );

    let mut results = BTreeMap::new();
    for raw in &request.video_ids {
        let video_id = extract_video_id(raw);
        let result = summarize_to_result(
            state.transcripts.as_ref(),
            state.summarizer.as_ref(),
            &video_id,
            &request.languages,
            &request.translate,
        )
        .await;
        results.insert(video_id, result);
    }

    tracing::info!(%request_id, "summarize request settled");
    Json(SummarizeResponse::Results(results))
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("Backend listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down backend");
        })
        .await?;
    Ok(())
}

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{Result, VidsumError},
    provider::Provider,
    transcript::TranscriptSource,
    types::{Transcript, VideoResult},
};

/// Turns transcript text into a markdown summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, output_language: &str) -> Result<String>;
}

pub struct LlmSummarizer {
    provider: Provider,
    client: Client,
}

impl LlmSummarizer {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            client: Client::new(),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }
}

pub fn build_prompt(text: &str, output_language: &str) -> String {
    format!(
        "Give me a resume in markdown format of this video transcription in {}:\n\n{}",
        output_language, text
    )
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str, output_language: &str) -> Result<String> {
        let prompt = build_prompt(text, output_language);
        tracing::info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            chars = text.len(),
            "requesting summary"
        );

        match &self.provider {
            Provider::Ollama { api_url, model } => {
                let response = self
                    .client
                    .post(api_url)
                    .json(&serde_json::json!({
                        "model": model,
                        "prompt": prompt,
                        "stream": false,
                    }))
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(VidsumError::SummaryFailed {
                        reason: format!("Ollama API call failed: {}", response.text().await?),
                    });
                }

                let body = response.json::<serde_json::Value>().await?;
                body["response"]
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| VidsumError::SummaryFailed {
                        reason: format!("Invalid Ollama response: {:?}", body),
                    })
            }
            Provider::Openai { api_url, model } => {
                let api_key = self.provider.api_key()?.unwrap_or_default();
                let body = self
                    .client
                    .post(api_url)
                    .header("Authorization", format!("Bearer {}", api_key))
                    .json(&serde_json::json!({
                        "model": model,
                        "messages": [
                            {
                                "role": "user",
                                "content": prompt,
                            },
                        ],
                    }))
                    .send()
                    .await?
                    .json::<serde_json::Value>()
                    .await?;

                body["choices"][0]["message"]["content"]
                    .as_str()
                    .map(|content| content.trim().to_string())
                    .ok_or_else(|| VidsumError::SummaryFailed {
                        reason: format!("Invalid OpenAI response: {:?}", body),
                    })
            }
        }
    }
}

/// Fetch a transcript and summarize it
pub async fn summarize_video(
    transcripts: &dyn TranscriptSource,
    summarizer: &dyn Summarizer,
    video_id: &str,
    languages: &[String],
    translate: &str,
) -> Result<(Transcript, String)> {
    let transcript = transcripts.fetch(video_id, languages).await?;
    let summary = summarizer.summarize(&transcript.text, translate).await?;
    Ok((transcript, summary))
}

/// Like [`summarize_video`], folding failures into the per-video result
pub async fn summarize_to_result(
    transcripts: &dyn TranscriptSource,
    summarizer: &dyn Summarizer,
    video_id: &str,
    languages: &[String],
    translate: &str,
) -> VideoResult {
    match summarize_video(transcripts, summarizer, video_id, languages, translate).await {
        Ok((transcript, summary)) => VideoResult::success(transcript.text, summary),
        Err(e) => {
            tracing::warn!(video_id, error = %e, "video summarization failed");
            VideoResult::failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    struct FixedTranscript;

    #[async_trait]
    impl TranscriptSource for FixedTranscript {
        async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript> {
            if video_id == "missing" {
                return Err(VidsumError::NoTranscript {
                    video_id: video_id.to_string(),
                    languages: languages.join(", "),
                });
            }
            Ok(Transcript {
                video_id: video_id.to_string(),
                language: languages[0].clone(),
                text: "raw words".to_string(),
                segments: vec![Segment {
                    start: 0.0,
                    end: 1.0,
                    text: "raw words".to_string(),
                }],
            })
        }
    }

    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(&self, text: &str, output_language: &str) -> Result<String> {
            Ok(format!("[{}] {}", output_language, text))
        }
    }

    #[test]
    fn prompt_names_language_and_carries_text() {
        let prompt = build_prompt("the words", "es");
        assert_eq!(
            prompt,
            "Give me a resume in markdown format of this video transcription in es:\n\nthe words"
        );
    }

    #[tokio::test]
    async fn success_carries_transcript_and_summary() {
        let result = summarize_to_result(
            &FixedTranscript,
            &EchoSummarizer,
            "abc",
            &["en".to_string()],
            "fr",
        )
        .await;
        assert_eq!(result, VideoResult::success("raw words".into(), "[fr] raw words".into()));
    }

    #[tokio::test]
    async fn failure_message_is_passed_through() {
        let result = summarize_to_result(
            &FixedTranscript,
            &EchoSummarizer,
            "missing",
            &["en".to_string(), "es".to_string()],
            "en",
        )
        .await;
        assert_eq!(
            result.error.as_deref(),
            Some("No transcript found for missing in languages: en, es")
        );
        assert_eq!(result.summary, None);
    }
}

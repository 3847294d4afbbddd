//! Transport between the view-model and the summarize backend.

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::Result,
    types::{SummarizeRequest, SummarizeResponse},
};

pub const SUMMARIZE_PATH: &str = "/summarize";

/// One round trip to the summarize endpoint
#[async_trait]
pub trait SummarizeApi: Send + Sync {
    async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizeResponse>;
}

/// `SummarizeApi` over HTTP.
///
/// The status code is not inspected: any JSON body the backend sends is
/// interpreted, and anything else is an error. No timeout is applied.
pub struct HttpApi {
    client: Client,
    endpoint: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUMMARIZE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SummarizeApi for HttpApi {
    async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizeResponse> {
        tracing::debug!(endpoint = %self.endpoint, video_ids = ?request.video_ids, "posting summarize request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;
        tracing::debug!(status = %response.status(), "summarize response received");
        Ok(response.json::<SummarizeResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_once() {
        assert_eq!(
            HttpApi::new("http://127.0.0.1:8000/").endpoint(),
            "http://127.0.0.1:8000/summarize"
        );
        assert_eq!(
            HttpApi::new("http://host").endpoint(),
            "http://host/summarize"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_api_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpApi::new(&format!("http://127.0.0.1:{}", port));
        let err = api
            .summarize(&SummarizeRequest::single("abc", "en", "en"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::VidsumError::ApiError(_)));
    }
}

use reqwest::{Client as HttpClient, StatusCode};

use crate::protocol::SessionTokenRequest;

/// Client for the avatar-streaming API's session-token endpoint.
pub struct UpstreamClient {
    http: HttpClient,
    api_url: String,
    api_key: String,
}

/// A completed upstream exchange: status plus the body text, which is read
/// from the wire exactly once so normalization can branch on it freely.
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamClient {
    pub fn new(api_url: &str, api_key: String) -> Self {
        Self {
            http: HttpClient::new(),
            api_url: normalize_base_url(api_url),
            api_key,
        }
    }

    pub async fn mint_token(
        &self,
        request: &SessionTokenRequest,
    ) -> Result<UpstreamReply, reqwest::Error> {
        let response = self
            .http
            .post(format!("{}/v1/sessions/token", self.api_url))
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(UpstreamReply { status, body })
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Which session variant to request from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionMode {
    Full,
    Custom,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvatarPersona {
    pub voice_id: String,
    pub context_id: String,
    pub language: String,
}

/// Payload sent to `POST /v1/sessions/token` on the upstream API.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionTokenRequest {
    pub mode: SessionMode,
    pub avatar_id: String,
    pub avatar_persona: AvatarPersona,
}

impl SessionTokenRequest {
    pub fn from_config(config: &Config, mode: SessionMode) -> Self {
        Self {
            mode,
            avatar_id: config.avatar_id.clone(),
            avatar_persona: AvatarPersona {
                voice_id: config.voice_id.clone(),
                context_id: config.context_id.clone(),
                language: config.language.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_token: String,
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

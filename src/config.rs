use clap::Parser;

/// Settings for the demo server. Every flag can also come from the
/// environment (or a `.env` file loaded at startup), matching the
/// variables the hosted demo uses.
#[derive(Debug, Clone, Parser)]
#[command(name = "live-avatar-demo", version, about = "Token server for the live avatar demo")]
pub struct Config {
    /// Secret key for the avatar-streaming API.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the avatar-streaming API.
    #[arg(long, env = "API_URL")]
    pub api_url: String,

    /// Avatar to request sessions for.
    #[arg(long, env = "AVATAR_ID")]
    pub avatar_id: String,

    /// Voice used by the avatar.
    #[arg(long, env = "VOICE_ID")]
    pub voice_id: String,

    /// Conversation context used by the avatar.
    #[arg(long, env = "CONTEXT_ID")]
    pub context_id: String,

    /// Language the avatar speaks.
    #[arg(long, env = "LANGUAGE", default_value = "en")]
    pub language: String,

    /// Address to serve on.
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: String,
}

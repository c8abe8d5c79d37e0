#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub vision_model: Option<String>,
    pub transcription_model: Option<String>,
    pub intent_model: Option<String>,
    pub speech_model: Option<String>,
    pub speech_voice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Settings {
    /// Load configuration from the environment. A missing API key is fatal;
    /// everything else falls back to a sensible default.
    pub fn from_env() -> Result<Self, SettingsError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SettingsError::MissingApiKey)?;

        let port = parse_env("SERVER_PORT", 3000)?;
        let max_file_size_mb = parse_env("MAX_FILE_SIZE_MB", 25)?;

        Ok(Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            openai: OpenAiSettings {
                api_key,
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
                vision_model: std::env::var("VISION_MODEL").ok(),
                transcription_model: std::env::var("TRANSCRIPTION_MODEL").ok(),
                intent_model: std::env::var("INTENT_MODEL").ok(),
                speech_model: std::env::var("SPEECH_MODEL").ok(),
                speech_voice: std::env::var("SPEECH_VOICE").ok(),
            },
            upload: UploadSettings { max_file_size_mb },
        })
    }
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| SettingsError::InvalidValue { name, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Transcripts are disabled for video ID: {video_id}")]
    TranscriptsDisabled { video_id: String },

    #[error("No transcript found for video ID: {video_id}")]
    NoTranscriptFound { video_id: String },

    #[error("Failed to translate transcript of {video_id} to '{language}': {reason}")]
    TranslationFailed {
        video_id: String,
        language: String,
        reason: String,
    },

    #[error("Failed to retrieve transcript: {0}")]
    FetchError(String),

    #[error("Parse error: {0}")]
    ParseError(&'static str),

    #[error("Failed to configure model access: {0}")]
    ModelConfigError(String),

    #[error("Failed to summarize part {part}: {reason}")]
    ModelGenerationError { part: usize, reason: String },

    #[error("Failed to generate summary: {0}")]
    ModelGenerationFatal(String),

    #[error("No transcript text provided for summarization")]
    EmptyTranscript,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::FetchError(err.to_string())
    }
}

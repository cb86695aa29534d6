mod error;
mod fetcher;
mod llm;
pub mod parser;
mod processor;
pub mod text;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::Error;
pub use fetcher::TranscriptFetcher;
pub use llm::{gemini, openai};
pub use llm::{
    model::TextModel,
    summarizer::{Summarizer, SummaryResponse},
};
pub use processor::{builder::DigestProcessorBuilder, DigestProcessor};

pub mod builder;

use crate::{
    error::Error,
    fetcher::TranscriptFetcher,
    llm::{model::TextModel, summarizer::Summarizer},
    types::{Digest, VideoReference},
    yt::{LanguageDetector, TranscriptService},
};

/// Runs the full URL to summary pipeline for a single video
#[derive(Debug)]
pub struct DigestProcessor<S, D, M>
where
    S: TranscriptService,
    D: LanguageDetector,
    M: TextModel,
{
    fetcher: TranscriptFetcher<S, D>,
    summarizer: Summarizer<M>,
}

impl<S, D, M> DigestProcessor<S, D, M>
where
    S: TranscriptService,
    D: LanguageDetector,
    M: TextModel,
{
    pub fn new(service: S, detector: D, model: M, max_chunk_size: usize) -> Self {
        DigestProcessor {
            fetcher: TranscriptFetcher::new(service, detector),
            summarizer: Summarizer::new(model, max_chunk_size),
        }
    }

    /// Summarizes the video behind `url` from its `language` transcript.
    ///
    /// Proxy settings are bound when the transcript service is constructed,
    /// see [`YtTranscriptClient::from_request`](crate::yt::client::YtTranscriptClient::from_request).
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, url: &str, language: &str) -> Result<Digest, Error> {
        let video = VideoReference::from_url(url)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to extract video ID"))?;

        tracing::info!(video_id = %video, "Extracted video ID");

        let transcript = self.fetcher.fetch(&video, language).await?;
        let response = self.summarizer.summarize(&transcript).await?;

        Ok(Digest {
            video,
            transcript,
            summary: response.summary,
            chunk_count: response.chunk_count,
        })
    }
}

use itertools::Itertools;

use crate::{
    error::Error,
    text::clean_transcript,
    types::{TrackList, TranscriptTrack, VideoReference},
    yt::{LanguageDetector, TranscriptService},
};

/// Resolves a caption track for a video and turns it into clean text
#[derive(Debug)]
pub struct TranscriptFetcher<S, D>
where
    S: TranscriptService,
    D: LanguageDetector,
{
    service: S,
    detector: D,
}

impl<S, D> TranscriptFetcher<S, D>
where
    S: TranscriptService,
    D: LanguageDetector,
{
    /// Number of leading characters handed to the language detector
    const DETECTION_SAMPLE_LEN: usize = 1000;

    pub fn new(service: S, detector: D) -> Self {
        Self { service, detector }
    }

    /// Fetches the transcript of `video` in `language`, translating
    /// another track when the language is not available.
    #[tracing::instrument(skip(self), fields(video_id = %video))]
    pub async fn fetch(
        &self,
        video: &VideoReference,
        language: &str,
    ) -> Result<String, Error> {
        let tracks = self
            .service
            .list_tracks(video)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list transcripts"))?;

        let track = self.resolve_track(&tracks, language)?;
        let mut text = self.fetch_text(&track).await?;

        if language == "en" && !self.is_english(&text) {
            tracing::warn!("Transcript does not appear to be in English, attempting translation");

            match self.translate_to_english(&tracks).await {
                Ok(translated) => {
                    if !self.is_english(&translated) {
                        tracing::warn!("Translation may not be accurate, proceeding with best effort");
                    }
                    text = translated;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Corrective translation failed, keeping transcript as fetched")
                }
            }
        }

        tracing::info!(chars = text.chars().count(), "Fetched transcript");

        Ok(text)
    }

    fn resolve_track(&self, tracks: &TrackList, language: &str) -> Result<TranscriptTrack, Error> {
        if let Some(track) = tracks.find(language) {
            return Ok(track.clone());
        }

        let source = tracks.any().ok_or_else(|| Error::NoTranscriptFound {
            video_id: tracks.video_id.clone(),
        })?;

        tracing::info!(
            from = %source.language_code,
            to = %language,
            "No transcript in requested language, requesting translation"
        );

        tracks
            .translate(source, language)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to translate transcript"))
    }

    async fn translate_to_english(&self, tracks: &TrackList) -> Result<String, Error> {
        let source = tracks.any().ok_or_else(|| Error::NoTranscriptFound {
            video_id: tracks.video_id.clone(),
        })?;
        let translated = tracks.translate(source, "en")?;

        self.fetch_text(&translated).await
    }

    async fn fetch_text(&self, track: &TranscriptTrack) -> Result<String, Error> {
        let snippets = self
            .service
            .fetch_track(track)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch transcript"))?;

        Ok(clean_transcript(
            &snippets.iter().map(|s| s.text.as_str()).join(" "),
        ))
    }

    /// Undetectable text counts as not English
    fn is_english(&self, text: &str) -> bool {
        let sample = text
            .chars()
            .take(Self::DETECTION_SAMPLE_LEN)
            .collect::<String>();

        self.detector.detect(&sample).as_deref() == Some("en")
    }
}

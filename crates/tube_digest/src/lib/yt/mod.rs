pub mod client;
pub mod detector;

use std::future::Future;

use crate::{
    error::Error,
    types::{Snippet, TrackList, TranscriptTrack},
};

pub trait TranscriptService {
    const BASE_URL: &str;

    /// Lists the caption tracks available for `video_id`
    fn list_tracks(&self, video_id: &str) -> impl Future<Output = Result<TrackList, Error>>;

    /// Fetches every caption line of `track`, in order
    fn fetch_track(
        &self,
        track: &TranscriptTrack,
    ) -> impl Future<Output = Result<Vec<Snippet>, Error>>;
}

pub trait LanguageDetector {
    /// Returns the ISO 639-1 code of the dominant language of `text`, or `None`
    /// when the language cannot be determined.
    fn detect(&self, text: &str) -> Option<String>;
}

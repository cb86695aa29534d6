use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tube_digest::{
    types::{Snippet, TrackList, TranscriptTrack, TranslationLanguage},
    yt::TranscriptService,
    Error,
};

pub fn track(language_code: &str, is_generated: bool, is_translatable: bool) -> TranscriptTrack {
    TranscriptTrack {
        language_code: language_code.to_string(),
        language: language_code.to_uppercase(),
        is_generated,
        is_translatable,
        base_url: track_url(language_code),
    }
}

pub fn track_url(language_code: &str) -> String {
    format!("https://mock.youtube/api/timedtext?lang={language_code}")
}

pub fn translated_url(source: &str, target: &str) -> String {
    format!("{}&tlang={target}", track_url(source))
}

#[derive(Clone)]
pub struct MockTranscriptService {
    pub tracks: Vec<TranscriptTrack>,
    pub translation_languages: Vec<TranslationLanguage>,
    pub texts: HashMap<String, Vec<String>>,
    pub list_calls: Arc<Mutex<Vec<String>>>,
    pub fetch_calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<fn(&str) -> Error>,
}

impl MockTranscriptService {
    pub fn new(tracks: Vec<TranscriptTrack>) -> Self {
        Self {
            tracks,
            translation_languages: Vec::new(),
            texts: HashMap::new(),
            list_calls: Arc::new(Mutex::new(Vec::new())),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(fail_with: fn(&str) -> Error) -> Self {
        Self {
            fail_with: Some(fail_with),
            ..Self::new(Vec::new())
        }
    }

    pub fn translatable_to(mut self, codes: &[&str]) -> Self {
        self.translation_languages = codes
            .iter()
            .map(|code| TranslationLanguage {
                language_code: code.to_string(),
                language: code.to_uppercase(),
            })
            .collect();
        self
    }

    pub fn with_text(mut self, url: impl Into<String>, lines: &[&str]) -> Self {
        self.texts
            .insert(url.into(), lines.iter().map(|l| l.to_string()).collect());
        self
    }
}

impl TranscriptService for MockTranscriptService {
    const BASE_URL: &'static str = "https://mock.youtube";

    async fn list_tracks(&self, video_id: &str) -> Result<TrackList, Error> {
        self.list_calls.lock().unwrap().push(video_id.to_string());
        if let Some(fail) = self.fail_with {
            return Err(fail(video_id));
        }
        Ok(TrackList {
            video_id: video_id.to_string(),
            tracks: self.tracks.clone(),
            translation_languages: self.translation_languages.clone(),
        })
    }

    async fn fetch_track(&self, track: &TranscriptTrack) -> Result<Vec<Snippet>, Error> {
        self.fetch_calls.lock().unwrap().push(track.base_url.clone());

        let lines = self
            .texts
            .get(&track.base_url)
            .ok_or_else(|| Error::FetchError(format!("no text for {}", track.base_url)))?;

        Ok(lines
            .iter()
            .enumerate()
            .map(|(idx, text)| Snippet {
                text: text.clone(),
                start: idx as f64 * 2.0,
                duration: 2.0,
            })
            .collect())
    }
}

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use tube_digest::yt::LanguageDetector;

/// Replays scripted answers, then repeats `fallback`
#[derive(Clone)]
pub struct MockDetector {
    pub answers: Arc<Mutex<VecDeque<Option<String>>>>,
    pub fallback: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockDetector {
    pub fn always(language: Option<&str>) -> Self {
        Self::scripted(&[], language)
    }

    pub fn scripted(answers: &[Option<&str>], fallback: Option<&str>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(
                answers.iter().map(|a| a.map(str::to_string)).collect(),
            )),
            fallback: fallback.map(str::to_string),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LanguageDetector for MockDetector {
    fn detect(&self, text: &str) -> Option<String> {
        self.calls.lock().unwrap().push(text.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

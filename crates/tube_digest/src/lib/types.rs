use std::{fmt, ops::Deref};

use crate::error::Error;

/// An 11 character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoReference(String);

impl VideoReference {
    /// Extracts the video identifier from any supported YouTube URL shape
    pub fn from_url(url: &str) -> Result<Self, Error> {
        crate::parser::extract_video_id(url)
            .map(VideoReference)
            .ok_or_else(|| Error::InvalidUrl(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for VideoReference {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw proxy inputs, as given on the command line or in the environment
#[derive(Debug, Clone, Default)]
pub struct ProxySettings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyConfig {
    Generic {
        username: String,
        password: String,
        host: String,
        port: u16,
    },
    /// Rotating residential proxies from webshare.io
    Webshare { username: String, password: String },
}

impl ProxyConfig {
    const WEBSHARE_DOMAIN: &str = "p.webshare.io";
    const WEBSHARE_PORT: u16 = 80;

    /// Credentials alone select Webshare; credentials plus host and port select a
    /// generic proxy. Without credentials the fetch goes out directly.
    pub fn from_settings(settings: &ProxySettings) -> Option<Self> {
        let username = settings.username.as_deref().filter(|s| !s.is_empty())?;
        let password = settings.password.as_deref().filter(|s| !s.is_empty())?;

        match (settings.host.as_deref().filter(|s| !s.is_empty()), settings.port) {
            (Some(host), Some(port)) => Some(ProxyConfig::Generic {
                username: username.to_string(),
                password: password.to_string(),
                host: host.to_string(),
                port,
            }),
            _ => Some(ProxyConfig::Webshare {
                username: username.to_string(),
                password: password.to_string(),
            }),
        }
    }

    pub fn url(&self) -> String {
        match self {
            ProxyConfig::Generic {
                username,
                password,
                host,
                port,
            } => format!("http://{username}:{password}@{host}:{port}"),
            ProxyConfig::Webshare { username, password } => format!(
                "http://{username}-rotate:{password}@{}:{}",
                Self::WEBSHARE_DOMAIN,
                Self::WEBSHARE_PORT
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptRequest {
    pub language: String,
    pub proxy: ProxySettings,
}

impl Default for TranscriptRequest {
    fn default() -> Self {
        Self {
            language: "en".into(),
            proxy: ProxySettings::default(),
        }
    }
}

impl TranscriptRequest {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn with_proxy(mut self, proxy: ProxySettings) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn proxy_config(&self) -> Option<ProxyConfig> {
        ProxyConfig::from_settings(&self.proxy)
    }
}

/// One language edition of a video's captions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptTrack {
    pub language_code: String,
    pub language: String,
    pub is_generated: bool,
    pub is_translatable: bool,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationLanguage {
    pub language_code: String,
    pub language: String,
}

/// All caption tracks available for a video
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    pub video_id: String,
    pub tracks: Vec<TranscriptTrack>,
    pub translation_languages: Vec<TranslationLanguage>,
}

impl TrackList {
    /// Manually created tracks first, then auto-generated ones
    fn ordered(&self) -> impl Iterator<Item = &TranscriptTrack> {
        self.tracks
            .iter()
            .filter(|t| !t.is_generated)
            .chain(self.tracks.iter().filter(|t| t.is_generated))
    }

    pub fn find(&self, language_code: &str) -> Option<&TranscriptTrack> {
        self.ordered().find(|t| t.language_code == language_code)
    }

    pub fn any(&self) -> Option<&TranscriptTrack> {
        self.ordered().next()
    }

    /// Derives a machine-translated variant of `track`
    pub fn translate(
        &self,
        track: &TranscriptTrack,
        language_code: &str,
    ) -> Result<TranscriptTrack, Error> {
        let failed = |reason: String| Error::TranslationFailed {
            video_id: self.video_id.clone(),
            language: language_code.to_string(),
            reason,
        };

        if !track.is_translatable {
            return Err(failed(format!(
                "track '{}' is not translatable",
                track.language_code
            )));
        }

        let target = self
            .translation_languages
            .iter()
            .find(|l| l.language_code == language_code)
            .ok_or_else(|| failed("language is not offered for translation".into()))?;

        Ok(TranscriptTrack {
            language_code: target.language_code.clone(),
            language: target.language.clone(),
            is_generated: true,
            is_translatable: false,
            base_url: format!("{}&tlang={}", track.base_url, target.language_code),
        })
    }
}

/// One timed caption line
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct Digest {
    pub video: VideoReference,
    pub transcript: String,
    pub summary: String,
    pub chunk_count: usize,
}

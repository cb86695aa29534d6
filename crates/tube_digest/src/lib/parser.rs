//! # Yt Parser
//!
//! Pure parsing helpers for the pieces of YouTube's web protocol the transcript
//! client touches: video URLs, the watch page, the innertube player response
//! and the timedtext caption XML.

use std::{ops::Deref, sync::LazyLock};

use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::Error,
    types::{Snippet, TrackList, TranscriptTrack, TranslationLanguage},
};

/// Standard watch URLs, embedded player URLs and youtu.be short links, in that order
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11}).*").unwrap(),
        Regex::new(r"(?:embed/)([0-9A-Za-z_-]{11})").unwrap(),
        Regex::new(r"(?:youtu\.be/)([0-9A-Za-z_-]{11})").unwrap(),
    ]
});

static INNERTUBE_API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());

static TIMEDTEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text([^>]*)>(.*?)</text>").unwrap());

static START_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"start="([0-9.]+)""#).unwrap());

static DUR_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"dur="([0-9.]+)""#).unwrap());

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

/// Returns the first 11 character video id matched by any of the accepted URL patterns
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// The html served at `youtube.com/watch?v=...`
pub struct WatchPage(String);

impl Deref for WatchPage {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for WatchPage {
    fn from(value: String) -> Self {
        WatchPage(value)
    }
}

impl WatchPage {
    pub fn new(html: String) -> Self {
        WatchPage(html)
    }

    /// Extracts the key required by the innertube player endpoint
    pub fn innertube_api_key(&self) -> Result<&str, Error> {
        if let Some(m) = INNERTUBE_API_KEY_RE.captures(self).and_then(|cap| cap.get(1)) {
            return Ok(m.as_str());
        }

        if self.contains(r#"class="g-recaptcha""#) {
            return Err(Error::FetchError(
                "YouTube is blocking requests from this IP (recaptcha challenge)".into(),
            ));
        }

        if self.contains(r#"action="https://consent.youtube.com/s""#) {
            return Err(Error::FetchError(
                "YouTube served a cookie consent page instead of the video".into(),
            ));
        }

        Err(Error::ParseError(
            "Failed to extract INNERTUBE_API_KEY from the watch page",
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    name: Option<TextRuns>,
    language_code: String,
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionLanguage {
    language_code: String,
    language_name: Option<TextRuns>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextRuns {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<Run>,
}

#[derive(Debug, Deserialize)]
struct Run {
    text: String,
}

impl TextRuns {
    fn text(&self) -> String {
        self.simple_text
            .clone()
            .or_else(|| self.runs.first().map(|r| r.text.clone()))
            .unwrap_or_default()
    }
}

/// Reads the caption tracks out of an innertube player response
#[tracing::instrument(skip(json))]
pub fn parse_track_list(video_id: &str, json: &Value) -> Result<TrackList, Error> {
    let playability = &json["playabilityStatus"];
    if let Some(status) = playability["status"].as_str() {
        if status != "OK" {
            let reason = playability["reason"]
                .as_str()
                .unwrap_or("no reason given")
                .to_string();
            return Err(Error::FetchError(format!(
                "Video {video_id} is not playable ({status}): {reason}"
            )));
        }
    }

    let captions = &json["captions"]["playerCaptionsTracklistRenderer"];
    let Some(caption_tracks) = captions.get("captionTracks") else {
        return Err(Error::TranscriptsDisabled {
            video_id: video_id.to_string(),
        });
    };

    let caption_tracks = serde_json::from_value::<Vec<CaptionTrack>>(caption_tracks.clone())
        .map_err(|_| Error::ParseError("Unexpected structure of 'captionTracks'"))?;

    let translation_languages = match captions.get("translationLanguages") {
        Some(langs) => serde_json::from_value::<Vec<CaptionLanguage>>(langs.clone())
            .map_err(|_| Error::ParseError("Unexpected structure of 'translationLanguages'"))?,
        None => Vec::new(),
    };

    let tracks = caption_tracks
        .into_iter()
        .map(|t| TranscriptTrack {
            language: t.name.unwrap_or_default().text(),
            is_generated: t.kind.as_deref() == Some("asr"),
            is_translatable: t.is_translatable,
            base_url: t.base_url.replace("&fmt=srv3", ""),
            language_code: t.language_code,
        })
        .collect();

    let translation_languages = translation_languages
        .into_iter()
        .map(|l| TranslationLanguage {
            language: l.language_name.unwrap_or_default().text(),
            language_code: l.language_code,
        })
        .collect();

    Ok(TrackList {
        video_id: video_id.to_string(),
        tracks,
        translation_languages,
    })
}

/// Parses timedtext caption XML into ordered snippets
pub fn parse_timedtext(xml: &str) -> Vec<Snippet> {
    TIMEDTEXT_RE
        .captures_iter(xml)
        .map(|cap| {
            let attrs = &cap[1];
            let number = |re: &Regex| {
                re.captures(attrs)
                    .and_then(|c| c[1].parse::<f64>().ok())
                    .unwrap_or_default()
            };

            // entities are escaped once by the XML layer and once more by YouTube
            Snippet {
                text: decode_entities(&decode_entities(&cap[2])),
                start: number(&START_ATTR_RE),
                duration: number(&DUR_ATTR_RE),
            }
        })
        .filter(|s| !s.text.is_empty())
        .collect()
}

fn decode_entities(input: &str) -> String {
    ENTITY_RE
        .replace_all(input, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16)
                        .ok()
                        .and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };

            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

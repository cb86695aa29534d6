use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::{
    error::Error,
    parser::{parse_timedtext, parse_track_list, WatchPage},
    types::{ProxyConfig, Snippet, TrackList, TranscriptRequest, TranscriptTrack},
    yt::TranscriptService,
};

/// Talks to YouTube's web endpoints, optionally through a proxy
#[derive(Debug, Clone)]
pub struct YtTranscriptClient {
    client: Client,
    base_url: String,
}

impl YtTranscriptClient {
    const ANDROID_CLIENT_VERSION: &str = "20.10.38";

    pub fn new(proxy: Option<&ProxyConfig>) -> Result<Self, Error> {
        let mut builder = Client::builder();

        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.url())?);

            // rotating proxies hand out a new exit IP per connection
            if matches!(proxy, ProxyConfig::Webshare { .. }) {
                builder = builder.pool_max_idle_per_host(0);
            }
        }

        let client = builder
            .build()
            .inspect_err(|e| tracing::error!(error = %e, "Failed to build http client"))?;

        Ok(Self {
            client,
            base_url: Self::BASE_URL.into(),
        })
    }

    pub fn from_request(request: &TranscriptRequest) -> Result<Self, Error> {
        Self::new(request.proxy_config().as_ref())
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &str) -> Result<WatchPage, Error> {
        let resp = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cookie", "CONSENT=YES+1")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let html = check_status(resp)?.text().await?;

        Ok(html.into())
    }

    #[tracing::instrument(skip(self, api_key))]
    async fn fetch_player_response(&self, video_id: &str, api_key: &str) -> Result<Value, Error> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": Self::ANDROID_CLIENT_VERSION
                }
            },
            "videoId": video_id
        });

        let resp = self
            .client
            .post(format!("{}/youtubei/v1/player", self.base_url))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Ok(check_status(resp)?.json::<Value>().await?)
    }
}

fn check_status(resp: Response) -> Result<Response, Error> {
    if resp.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::FetchError(
            "YouTube is rate limiting requests from this IP (429)".into(),
        ));
    }

    Ok(resp.error_for_status()?)
}

impl TranscriptService for YtTranscriptClient {
    const BASE_URL: &str = "https://www.youtube.com";

    async fn list_tracks(&self, video_id: &str) -> Result<TrackList, Error> {
        let page = self.fetch_watch_page(video_id).await?;
        let api_key = page.innertube_api_key()?;
        let player = self.fetch_player_response(video_id, api_key).await?;

        parse_track_list(video_id, &player)
    }

    #[tracing::instrument(skip_all, fields(language = %track.language_code))]
    async fn fetch_track(&self, track: &TranscriptTrack) -> Result<Vec<Snippet>, Error> {
        let resp = self
            .client
            .get(&track.base_url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch caption track"))?;

        let xml = check_status(resp)?.text().await?;

        Ok(parse_timedtext(&xml))
    }
}

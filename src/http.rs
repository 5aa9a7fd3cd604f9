use std::time::Duration;

use crate::error::AppError;
use crate::model::{PlaylistResponse, Song};

pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /api/playlist`. The server re-reads its backing file per request,
    /// so this always reflects the file on disk.
    pub async fn fetch_playlist(&self) -> Result<Vec<Song>, AppError> {
        let url = format!("{}/api/playlist", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let playlist: PlaylistResponse = response.json().await?;
        Ok(playlist.songs)
    }

    /// Resolve a song's `src` against the server base. Absolute URLs pass
    /// through untouched.
    pub fn audio_url(&self, src: &str) -> String {
        if src.starts_with("http://") || src.starts_with("https://") {
            return src.to_string();
        }
        if src.starts_with('/') {
            format!("{}{}", self.base_url, src)
        } else {
            format!("{}/{}", self.base_url, src)
        }
    }

    /// Fetch the whole audio file. Tracks are small enough that buffering
    /// them beats a streaming decode here.
    pub async fn fetch_audio(&self, src: &str) -> Result<Vec<u8>, AppError> {
        let url = self.audio_url(src);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url = %url, bytes = bytes.len(), "audio fetched");
        Ok(bytes.to_vec())
    }
}

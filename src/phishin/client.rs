use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::catalog::ShowCatalog;
use crate::error::{AppError, Result};
use crate::phishin::models::{ApiResponse, Show, Song};

const PHISHIN_API_BASE: &str = "https://phish.in/api/v1";

pub struct PhishinClient {
    http_client: Client,
    token: String,
    api_base: String,
}

impl PhishinClient {
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            token: token.to_string(),
            api_base: PHISHIN_API_BASE.to_string(),
        })
    }

    /// Point the client at another deployment of the same API.
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, what, &error_text));
        }

        let body: ApiResponse<T> = response.json().await?;
        body.into_data()
            .ok_or_else(|| AppError::NotFound(what.to_string()))
    }

    async fn get_show(&self, path: &str, what: &str) -> Result<Show> {
        let show: Show = self.get(path, what).await?;
        check_show(show, what)
    }

    pub async fn show_on_date(&self, date: NaiveDate) -> Result<Show> {
        let path = format!("show-on-date/{}", date.format("%Y-%m-%d"));
        self.get_show(&path, &format!("show on {}", date)).await
    }

    pub async fn random_show(&self) -> Result<Show> {
        self.get_show("random-show", "random show").await
    }

    pub async fn song_by_title(&self, title: &str) -> Result<Song> {
        let path = song_path(title);
        let song: Song = self.get(&path, &format!("song '{}'", title)).await?;
        debug!("Found {} with {} tracks", song.title, song.tracks.len());
        Ok(song)
    }
}

#[async_trait]
impl ShowCatalog for PhishinClient {
    async fn show_on_date(&self, date: NaiveDate) -> Result<Show> {
        PhishinClient::show_on_date(self, date).await
    }

    async fn random_show(&self) -> Result<Show> {
        PhishinClient::random_show(self).await
    }

    async fn song_by_title(&self, title: &str) -> Result<Song> {
        PhishinClient::song_by_title(self, title).await
    }
}

/// A 404 means the archive has no such show or song; anything else is an API failure.
fn status_error(status: StatusCode, what: &str, body: &str) -> AppError {
    if status == StatusCode::NOT_FOUND {
        return AppError::NotFound(what.to_string());
    }

    warn!("phish.in request for {} failed ({}): {}", what, status, body);
    AppError::PhishinApi(format!("{} returned {}: {}", what, status, body))
}

/// phish.in answers some misses with an empty show instead of a 404.
fn check_show(show: Show, what: &str) -> Result<Show> {
    if show.id == 0 {
        return Err(AppError::NotFound(what.to_string()));
    }
    Ok(show)
}

fn song_path(title: &str) -> String {
    format!("songs/{}", urlencoding::encode(&slugify(title)))
}

/// The lookup key phish.in uses for song titles.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            ' ' | '\'' | '/' => Some('-'),
            ',' | '.' | '?' => None,
            c => Some(c),
        })
        .collect::<String>()
        .to_lowercase()
}

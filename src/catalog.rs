use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::phishin::{Show, Song};
use crate::phishnet::UpcomingShow;

/// Read access to the archive of recorded shows.
#[async_trait]
pub trait ShowCatalog: Send + Sync {
    async fn show_on_date(&self, date: NaiveDate) -> Result<Show>;

    async fn random_show(&self) -> Result<Show>;

    /// Look a song up by its display title. Implementations slugify the title.
    async fn song_by_title(&self, title: &str) -> Result<Song>;
}

/// Read access to the tour calendar.
#[async_trait]
pub trait ShowCalendar: Send + Sync {
    /// Shows sorted by date, oldest first.
    async fn upcoming_shows(&self) -> Result<Vec<UpcomingShow>>;
}

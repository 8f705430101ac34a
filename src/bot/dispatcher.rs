use chrono::{DateTime, FixedOffset};
use tracing::{debug, info};

use crate::aggregator::{last_played_tracks, longest_tracks, next_show, setlist_for_show};
use crate::catalog::{ShowCalendar, ShowCatalog};
use crate::clock::Clock;
use crate::command::{Command, parse_command};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::format::{days_since, days_until};
use crate::render::{
    Reply, embed_for_last_played, embed_for_longest, embed_for_next_show, embed_for_setlist,
};

/// A chat message as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
}

/// Turns chat messages into replies: parse, fetch, aggregate, render.
pub struct Dispatcher<C, K> {
    catalog: C,
    calendar: K,
    clock: Clock,
    last_played_count: usize,
    longest_count: usize,
}

impl<C, K> Dispatcher<C, K>
where
    C: ShowCatalog,
    K: ShowCalendar,
{
    pub fn new(catalog: C, calendar: K, config: &Config) -> Self {
        Self {
            catalog,
            calendar,
            clock: config.clock,
            last_played_count: config.last_played_count,
            longest_count: config.longest_count,
        }
    }

    /// Reply to a message, or `None` when there is nothing to say.
    /// Messages written by the bot itself are always ignored.
    pub async fn handle(&self, bot_user_id: u64, message: &Inbound) -> Result<Option<Reply>> {
        if message.author_id == bot_user_id {
            return Ok(None);
        }

        self.respond(&message.content).await
    }

    pub async fn respond(&self, content: &str) -> Result<Option<Reply>> {
        self.respond_at(content, self.clock.now()).await
    }

    pub async fn respond_at(
        &self,
        content: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<Option<Reply>> {
        let command = parse_command(content)?;
        if command == Command::Unknown {
            return Ok(None);
        }

        info!("Handling {:?}", command);
        self.run(command, now).await
    }

    async fn run(&self, command: Command, now: DateTime<FixedOffset>) -> Result<Option<Reply>> {
        let reply = match command {
            Command::Setlist(date) => {
                let show = self.catalog.show_on_date(date).await?;
                embed_for_setlist(&setlist_for_show(&show)).into()
            }
            Command::Random => {
                let show = self.catalog.random_show().await?;
                debug!("Random show: {}", show.date);
                embed_for_setlist(&setlist_for_show(&show)).into()
            }
            Command::LastPlayed(title) => {
                let last_played =
                    last_played_tracks(&self.catalog, &title, self.last_played_count).await?;
                let days_ago = last_played
                    .most_recent()
                    .and_then(|show| self.clock.midnight(show.date))
                    .map(|then| days_since(now, then))
                    .unwrap_or_default();
                embed_for_last_played(&last_played, days_ago)?.into()
            }
            Command::Longest(title) => {
                let longest = longest_tracks(&self.catalog, &title, self.longest_count).await?;
                embed_for_longest(&longest)?.into()
            }
            Command::DaysUntil(date) => {
                let Some(then) = self.clock.midnight(date) else {
                    debug!("{} is out of range", date);
                    return Ok(None);
                };
                let text = days_until(now, then);
                if text.is_empty() {
                    debug!("{} has already passed", date);
                    return Ok(None);
                }
                Reply::Text(text)
            }
            Command::NextShow => {
                let shows = self.calendar.upcoming_shows().await?;
                let show = next_show(&shows, now, &self.clock)
                    .ok_or_else(|| AppError::NotFound("upcoming show".into()))?;
                let until = self
                    .clock
                    .midnight(show.date)
                    .map(|then| days_until(now, then))
                    .unwrap_or_default();
                embed_for_next_show(show, &until).into()
            }
            Command::Unknown => return Ok(None),
        };

        Ok(Some(reply))
    }
}

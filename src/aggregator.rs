use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::debug;

use crate::catalog::ShowCatalog;
use crate::clock::Clock;
use crate::error::{AppError, Result};
use crate::format::duration_from_millis;
use crate::phishin::{Show, SongTrack};
use crate::phishnet::UpcomingShow;

/// A show's tracks grouped into sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Setlist {
    pub date: NaiveDate,
    pub venue: String,
    pub location: String,
    pub duration: Duration,
    pub sets: Vec<Set>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub name: String,
    pub duration: Duration,
    pub songs: Vec<String>,
}

impl Set {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            duration: Duration::ZERO,
            songs: Vec::new(),
        }
    }
}

/// The most recent distinct shows a song was played at, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct LastPlayed {
    pub title: String,
    pub url: String,
    pub play_count: usize,
    pub shows: Vec<Show>,
}

impl LastPlayed {
    pub fn most_recent(&self) -> Option<&Show> {
        self.shows.last()
    }
}

/// The longest performances of a song, longest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Longest {
    pub title: String,
    pub play_count: usize,
    pub tracks: Vec<LongestTrack>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongestTrack {
    pub duration: Duration,
    pub show: Show,
}

/// Group a show's tracks into sets. A set ends whenever the set label changes,
/// so a label that comes back later starts a new set.
pub fn setlist_for_show(show: &Show) -> Setlist {
    let mut sets: Vec<Set> = Vec::new();
    let mut current: Option<Set> = None;

    for track in &show.tracks {
        let mut set = match current.take() {
            Some(set) if set.name == track.set_name => set,
            Some(finished) => {
                sets.push(finished);
                Set::new(&track.set_name)
            }
            None => Set::new(&track.set_name),
        };

        set.duration += duration_from_millis(track.duration);
        set.songs.push(track.title.clone());
        current = Some(set);
    }
    sets.extend(current);

    Setlist {
        date: show.date,
        venue: show.venue.name.clone(),
        location: show.venue.location.clone(),
        duration: duration_from_millis(show.duration),
        sets,
    }
}

/// Fetch the last `count` distinct shows where `title` was played.
pub async fn last_played_tracks<C>(catalog: &C, title: &str, count: usize) -> Result<LastPlayed>
where
    C: ShowCatalog + ?Sized,
{
    let song = catalog.song_by_title(title).await?;

    let recent = most_recent_distinct(&song.tracks, count);
    if recent.is_empty() {
        return Err(AppError::NotFound(format!("plays of '{}'", song.title)));
    }
    debug!("{} was played at {} recent shows", song.title, recent.len());

    let mut shows = Vec::with_capacity(recent.len());
    for track in recent.iter().rev() {
        shows.push(resolve_show(catalog, track.show_date).await?);
    }

    Ok(LastPlayed {
        url: song.url(),
        play_count: song.tracks.len(),
        title: song.title,
        shows,
    })
}

/// Fetch the `count` longest performances of `title`.
pub async fn longest_tracks<C>(catalog: &C, title: &str, count: usize) -> Result<Longest>
where
    C: ShowCatalog + ?Sized,
{
    let song = catalog.song_by_title(title).await?;

    let longest = longest_first(&song.tracks, count);
    if longest.is_empty() {
        return Err(AppError::NotFound(format!("plays of '{}'", song.title)));
    }

    let mut tracks = Vec::with_capacity(longest.len());
    for track in longest {
        tracks.push(LongestTrack {
            duration: duration_from_millis(track.duration),
            show: resolve_show(catalog, track.show_date).await?,
        });
    }

    Ok(Longest {
        play_count: song.tracks.len(),
        title: song.title,
        tracks,
    })
}

/// The first show whose local midnight is after `now`.
pub fn next_show<'a>(
    shows: &'a [UpcomingShow],
    now: DateTime<FixedOffset>,
    clock: &Clock,
) -> Option<&'a UpcomingShow> {
    shows
        .iter()
        .find(|show| clock.midnight(show.date).is_some_and(|midnight| midnight > now))
}

/// Walk newest to oldest, keeping one track per show, until `count` shows are found.
/// The result is newest first.
fn most_recent_distinct(tracks: &[SongTrack], count: usize) -> Vec<&SongTrack> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .rev()
        .filter(|track| seen.insert(track.show_id))
        .take(count)
        .collect()
}

/// Tracks sorted by duration, longest first. Equal durations keep API order.
fn longest_first(tracks: &[SongTrack], count: usize) -> Vec<&SongTrack> {
    let mut sorted: Vec<&SongTrack> = tracks.iter().collect();
    sorted.sort_by(|a, b| b.duration.cmp(&a.duration));
    sorted.truncate(count);
    sorted
}

async fn resolve_show<C>(catalog: &C, date: NaiveDate) -> Result<Show>
where
    C: ShowCatalog + ?Sized,
{
    catalog
        .show_on_date(date)
        .await
        .map_err(|source| AppError::ShowLookup {
            date,
            source: Box::new(source),
        })
}

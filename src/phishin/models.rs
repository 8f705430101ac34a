use chrono::NaiveDate;
use serde::Deserialize;

use crate::phishin::PHISHIN_BASE_URL;

/// Envelope around every phish.in v1 response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// The payload, or `None` when the API reports no match.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub show_id: u64,
    pub title: String,
    #[serde(default)]
    pub position: u32,
    /// Milliseconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Show {
    #[serde(default)]
    pub id: u64,
    pub date: NaiveDate,
    /// Milliseconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub venue: Venue,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Show {
    pub fn url(&self) -> String {
        show_url(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tracks_count: usize,
    /// Every recorded performance, oldest first.
    #[serde(default)]
    pub tracks: Vec<SongTrack>,
}

impl Song {
    pub fn url(&self) -> String {
        format!("{}/{}", PHISHIN_BASE_URL, self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SongTrack {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Milliseconds.
    #[serde(default)]
    pub duration: u64,
    pub show_id: u64,
    pub show_date: NaiveDate,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub position: u32,
}

pub fn show_url(date: NaiveDate) -> String {
    format!("{}/{}", PHISHIN_BASE_URL, date.format("%Y-%m-%d"))
}

#[cfg(test)]
impl Show {
    pub fn mock(date: &str, venue: &str, location: &str) -> Self {
        Self {
            id: 1,
            date: date.parse().expect("test dates are ISO formatted"),
            duration: 0,
            venue: Venue {
                id: 1,
                slug: String::new(),
                name: venue.to_string(),
                location: location.to_string(),
            },
            tracks: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Track {
    pub fn mock(set_name: &str, title: &str, duration: u64) -> Self {
        Self {
            id: 0,
            show_id: 1,
            title: title.to_string(),
            position: 0,
            duration,
            set: String::new(),
            set_name: set_name.to_string(),
        }
    }
}

#[cfg(test)]
impl SongTrack {
    pub fn mock(show_id: u64, show_date: &str, duration: u64) -> Self {
        Self {
            id: 0,
            title: "Mock Song".to_string(),
            duration,
            show_id,
            show_date: show_date.parse().expect("test dates are ISO formatted"),
            set: "1".to_string(),
            position: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_show_response() {
        let json = r#"{
            "success": true,
            "total_entries": 1,
            "total_pages": 1,
            "page": 1,
            "data": {
                "id": 2032,
                "date": "2021-08-31",
                "duration": 11205000,
                "incomplete": false,
                "sbd": true,
                "venue": {
                    "id": 540,
                    "slug": "shoreline-amphitheatre",
                    "name": "Shoreline Amphitheatre",
                    "location": "Mountain View, CA",
                    "shows_count": 30
                },
                "tracks": [
                    {
                        "id": 1,
                        "show_id": 2032,
                        "show_date": "2021-08-31",
                        "title": "Glide",
                        "position": 1,
                        "duration": 120000,
                        "set": "1",
                        "set_name": "Set 1",
                        "tags": []
                    }
                ]
            }
        }"#;

        let response: ApiResponse<Show> = serde_json::from_str(json).unwrap();
        let show = response.into_data().unwrap();

        assert_eq!(show.id, 2032);
        assert_eq!(show.date, NaiveDate::from_ymd_opt(2021, 8, 31).unwrap());
        assert_eq!(show.venue.name, "Shoreline Amphitheatre");
        assert_eq!(show.tracks[0].set_name, "Set 1");
        assert_eq!(show.url(), "https://phish.in/2021-08-31");
    }

    #[test]
    fn test_decode_not_found_response() {
        let json = r#"{"success": false, "message": "Record not found"}"#;
        let response: ApiResponse<Song> = serde_json::from_str(json).unwrap();

        assert_eq!(response.message.as_deref(), Some("Record not found"));
        assert!(response.into_data().is_none());
    }

    #[test]
    fn test_song_url() {
        let json = r#"{
            "success": true,
            "data": {
                "id": 83,
                "title": "Black-Eyed Katy",
                "slug": "black-eyed-katy",
                "tracks_count": 2,
                "tracks": [
                    {"id": 1, "title": "Black-Eyed Katy", "duration": 300000, "show_id": 10, "show_date": "1997-11-28"},
                    {"id": 2, "title": "Black-Eyed Katy", "duration": 420000, "show_id": 11, "show_date": "1997-12-05"}
                ]
            }
        }"#;

        let song = serde_json::from_str::<ApiResponse<Song>>(json)
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(song.url(), "https://phish.in/black-eyed-katy");
        assert_eq!(song.tracks.len(), 2);
        assert_eq!(song.tracks[1].show_id, 11);
    }
}

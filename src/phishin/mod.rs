pub mod client;
pub mod models;

pub const PHISHIN_BASE_URL: &str = "https://phish.in";

pub use client::{PhishinClient, slugify};
pub use models::{Show, Song, SongTrack, Track, Venue, show_url};

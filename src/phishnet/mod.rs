pub mod client;
pub mod models;

pub use client::PhishnetClient;
pub use models::UpcomingShow;

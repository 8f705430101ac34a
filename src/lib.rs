pub mod aggregator;
pub mod bot;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod format;
pub mod phishin;
pub mod phishnet;
pub mod render;

pub use aggregator::{LastPlayed, Longest, Set, Setlist};
pub use bot::{Dispatcher, Handler, Inbound, run_bot};
pub use catalog::{ShowCalendar, ShowCatalog};
pub use clock::Clock;
pub use command::{Command, CommandKind, ParseError, parse_command};
pub use config::Config;
pub use error::{AppError, Result};
pub use phishin::{PhishinClient, Show, Song};
pub use phishnet::{PhishnetClient, UpcomingShow};
pub use render::{Embed, Reply};

use crate::aggregator::{LastPlayed, Longest, Setlist};
use crate::error::{AppError, Result};
use crate::format::{format_date_compact, format_date_full, format_duration};
use crate::phishin::{Show, show_url};
use crate::phishnet::UpcomingShow;

/// Discord "green": https://gist.github.com/thomasbnt/b6f455e2c7d743b796917fa3c205f812
pub const EMBED_COLOR: u32 = 5_763_719;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub footer: Option<String>,
}

/// What the bot sends back for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Embed(Embed),
    Text(String),
}

impl From<Embed> for Reply {
    fn from(embed: Embed) -> Self {
        Reply::Embed(embed)
    }
}

pub fn embed_for_setlist(setlist: &Setlist) -> Embed {
    let mut description = String::new();

    for set in &setlist.sets {
        description.push_str(&format!(
            "🔥 __{}__ ({})\n",
            set.name,
            format_duration(set.duration)
        ));

        let songs: Vec<String> = set
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("**{}.** {}", i + 1, song))
            .collect();
        description.push_str(&songs.join(" "));
        description.push_str("\n\n");
    }
    description.push_str(&format!("{}\n", show_url(setlist.date)));

    Embed {
        title: format!(
            "Setlist for {} @ {} in {}",
            format_date_compact(setlist.date),
            setlist.venue,
            setlist.location
        ),
        description,
        footer: Some(format!(
            "Total set duration: {}",
            format_duration(setlist.duration)
        )),
    }
}

/// `days_ago` counts whole days since the most recent show.
pub fn embed_for_last_played(last_played: &LastPlayed, days_ago: i64) -> Result<Embed> {
    let Some((last, rest)) = last_played.shows.split_last() else {
        return Err(AppError::NotFound(format!("plays of '{}'", last_played.title)));
    };

    let mut description = format!("It was played on {}\n", show_link(last));

    if !rest.is_empty() {
        description.push_str("\nNext most recent plays 🌸:\n");
        for show in rest.iter().rev() {
            description.push_str(&format!("🌵 {}\n", show_link(show)));
        }
    }
    description.push_str(&format!("\n{}\n", last_played.url));

    Ok(Embed {
        title: format!(
            "{} was last played {} days ago",
            last_played.title, days_ago
        ),
        description,
        footer: Some(format!("Total play count: {}", last_played.play_count)),
    })
}

pub fn embed_for_longest(longest: &Longest) -> Result<Embed> {
    let title = match longest.tracks.len() {
        0 => return Err(AppError::NotFound(format!("plays of '{}'", longest.title))),
        1 => format!("The longest version of {}", longest.title),
        n => format!("The {} longest versions of {}", n, longest.title),
    };

    let mut description = String::new();
    for track in &longest.tracks {
        description.push_str(&format!(
            "[{} on {} 🐟🐟🐟 @ {} in {}]({})\n\n",
            format_duration(track.duration),
            format_date_full(track.show.date),
            track.show.venue.name,
            track.show.venue.location,
            track.show.url()
        ));
    }

    Ok(Embed {
        title,
        description,
        footer: Some(format!("Total play count: {}", longest.play_count)),
    })
}

/// `until` is the `days_until` line for the show's date.
pub fn embed_for_next_show(show: &UpcomingShow, until: &str) -> Embed {
    let mut description = format!("{} in {}\n", show.venue, show.location());
    if !show.permalink.is_empty() {
        description.push_str(&format!("\n{}\n", show.permalink));
    }

    Embed {
        title: format!("The next show is {}", format_date_full(show.date)),
        description,
        footer: (!until.is_empty()).then(|| until.to_string()),
    }
}

fn show_link(show: &Show) -> String {
    format!(
        "[{} @ {} in {}]({})",
        format_date_full(show.date),
        show.venue.name,
        show.venue.location,
        show.url()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{LongestTrack, Set};
    use std::time::Duration;

    fn hms(h: u64, m: u64, s: u64) -> Duration {
        Duration::from_secs(h * 3600 + m * 60 + s)
    }

    fn katy(shows: Vec<Show>, play_count: usize) -> LastPlayed {
        LastPlayed {
            title: "Black-Eyed Katy".to_string(),
            url: "https://phish.in/black-eyed-katy".to_string(),
            play_count,
            shows,
        }
    }

    #[test]
    fn test_setlist_embed() {
        let setlist = Setlist {
            date: "2021-08-31".parse().unwrap(),
            venue: "Shoreline Amphitheatre".into(),
            location: "Mountain View, CA".into(),
            duration: hms(3, 6, 45),
            sets: vec![
                Set {
                    name: "Set 1".into(),
                    duration: hms(1, 26, 48),
                    songs: vec!["Glide".into(), "Colonel Forbin's Ascent".into()],
                },
                Set {
                    name: "Set 2".into(),
                    duration: hms(1, 29, 24),
                    songs: vec!["Soul Planet".into()],
                },
                Set {
                    name: "Encore".into(),
                    duration: hms(0, 10, 32),
                    songs: vec!["Fee".into(), "Wilson".into()],
                },
            ],
        };

        let embed = embed_for_setlist(&setlist);

        assert_eq!(
            embed,
            Embed {
                title: "Setlist for 8/31/2021 @ Shoreline Amphitheatre in Mountain View, CA".into(),
                description: "🔥 __Set 1__ (01:26:48)
**1.** Glide **2.** Colonel Forbin's Ascent

🔥 __Set 2__ (01:29:24)
**1.** Soul Planet

🔥 __Encore__ (00:10:32)
**1.** Fee **2.** Wilson

https://phish.in/2021-08-31
"
                .into(),
                footer: Some("Total set duration: 03:06:45".into()),
            }
        );
    }

    #[test]
    fn test_last_played_embed() {
        let last_played = katy(
            vec![
                Show::mock("1997-11-28", "The Centrum", "Worcester, MA"),
                Show::mock("1997-12-05", "CSU Convocation Center", "Cleveland, OH"),
                Show::mock("1997-12-30", "Madison Square Garden", "New York, NY"),
            ],
            7,
        );

        let embed = embed_for_last_played(&last_played, 9000).unwrap();

        assert_eq!(embed.title, "Black-Eyed Katy was last played 9000 days ago");
        assert_eq!(
            embed.description,
            "It was played on [Tuesday, December 30, 1997 @ Madison Square Garden in New York, NY](https://phish.in/1997-12-30)

Next most recent plays 🌸:
🌵 [Friday, December 5, 1997 @ CSU Convocation Center in Cleveland, OH](https://phish.in/1997-12-05)
🌵 [Friday, November 28, 1997 @ The Centrum in Worcester, MA](https://phish.in/1997-11-28)

https://phish.in/black-eyed-katy
"
        );
        assert_eq!(embed.footer.as_deref(), Some("Total play count: 7"));
    }

    #[test]
    fn test_last_played_embed_with_one_play() {
        let last_played = LastPlayed {
            title: "And So To Bed".into(),
            url: "https://phish.in/and-so-to-bed".into(),
            play_count: 1,
            shows: vec![Show::mock("2021-10-15", "Golden 1 Center", "Sacramento, CA")],
        };

        let embed = embed_for_last_played(&last_played, 3).unwrap();

        assert_eq!(embed.title, "And So To Bed was last played 3 days ago");
        assert_eq!(
            embed.description,
            "It was played on [Friday, October 15, 2021 @ Golden 1 Center in Sacramento, CA](https://phish.in/2021-10-15)

https://phish.in/and-so-to-bed
"
        );
    }

    #[test]
    fn test_last_played_embed_without_shows() {
        let err = embed_for_last_played(&katy(Vec::new(), 0), 0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_longest_embed_titles() {
        let track = |date: &str, secs: u64| LongestTrack {
            duration: Duration::from_secs(secs),
            show: Show::mock(date, "The Centrum", "Worcester, MA"),
        };

        let mut longest = Longest {
            title: "Tweezer".into(),
            play_count: 420,
            tracks: vec![track("1997-11-28", 1510)],
        };

        let embed = embed_for_longest(&longest).unwrap();
        assert_eq!(embed.title, "The longest version of Tweezer");
        assert_eq!(
            embed.description,
            "[00:25:10 on Friday, November 28, 1997 🐟🐟🐟 @ The Centrum in Worcester, MA](https://phish.in/1997-11-28)\n\n"
        );
        assert_eq!(embed.footer.as_deref(), Some("Total play count: 420"));

        longest.tracks.push(track("1997-11-29", 900));
        let embed = embed_for_longest(&longest).unwrap();
        assert_eq!(embed.title, "The 2 longest versions of Tweezer");

        longest.tracks.clear();
        assert!(embed_for_longest(&longest).is_err());
    }

    #[test]
    fn test_next_show_embed() {
        let show = UpcomingShow::mock("1", "2022-07-14");
        let embed = embed_for_next_show(&show, "11 days");

        assert_eq!(embed.title, "The next show is Thursday, July 14, 2022");
        assert_eq!(
            embed.description,
            "Madison Square Garden in New York, NY\n\nhttps://phish.net/setlists/1\n"
        );
        assert_eq!(embed.footer.as_deref(), Some("11 days"));

        let mut show = show;
        show.permalink.clear();
        let embed = embed_for_next_show(&show, "");
        assert_eq!(embed.description, "Madison Square Garden in New York, NY\n");
        assert_eq!(embed.footer, None);
    }
}

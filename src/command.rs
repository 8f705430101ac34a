use std::fmt;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// Formats tried when the first number in the input has four digits.
const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Two-digit year formats must come before their four-digit twins, since `%Y`
/// happily reads "21" as the year 21.
const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%y", "%m/%d/%Y", "%m-%d-%y", "%m-%d-%Y", "%m.%d.%y", "%m.%d.%Y",
];

const NAMED_MONTH_FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y", "%d %B, %Y"];

/// The command keyword without its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Setlist,
    Random,
    NextShow,
    LastPlayed,
    Longest,
    DaysUntil,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Setlist,
        CommandKind::Random,
        CommandKind::NextShow,
        CommandKind::LastPlayed,
        CommandKind::Longest,
        CommandKind::DaysUntil,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Setlist => "setlist",
            CommandKind::Random => "random",
            CommandKind::NextShow => "nextshow",
            CommandKind::LastPlayed => "lastplayed",
            CommandKind::Longest => "longest",
            CommandKind::DaysUntil => "daysuntil",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.keyword())
    }
}

/// A recognized chat command together with its typed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Setlist(NaiveDate),
    Random,
    NextShow,
    LastPlayed(String),
    Longest(String),
    DaysUntil(NaiveDate),
    Unknown,
}

impl Command {
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            Command::Setlist(_) => Some(CommandKind::Setlist),
            Command::Random => Some(CommandKind::Random),
            Command::NextShow => Some(CommandKind::NextShow),
            Command::LastPlayed(_) => Some(CommandKind::LastPlayed),
            Command::Longest(_) => Some(CommandKind::Longest),
            Command::DaysUntil(_) => Some(CommandKind::DaysUntil),
            Command::Unknown => None,
        }
    }
}

/// A recognized command whose date argument could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{command}: could not read a date from {input:?}")]
pub struct ParseError {
    pub command: CommandKind,
    pub input: String,
}

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\.(setlist|random|nextshow|lastplayed|longest|daysuntil)\b(.*)$")
            .expect("command pattern is valid")
    })
}

/// Extract a command from a raw chat message.
///
/// Text without a `.<keyword>` token is `Command::Unknown`, never an error.
/// Only a recognized date command with an unreadable date fails.
pub fn parse_command(message: &str) -> Result<Command, ParseError> {
    let Some(captures) = command_regex().captures(message) else {
        return Ok(Command::Unknown);
    };

    let Some(kind) = CommandKind::from_keyword(&captures[1]) else {
        return Ok(Command::Unknown);
    };
    let rest = captures.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

    let command = match kind {
        CommandKind::Setlist => Command::Setlist(parse_date_for(kind, rest)?),
        CommandKind::DaysUntil => Command::DaysUntil(parse_date_for(kind, rest)?),
        CommandKind::LastPlayed => Command::LastPlayed(rest.to_string()),
        CommandKind::Longest => Command::Longest(rest.to_string()),
        CommandKind::Random => Command::Random,
        CommandKind::NextShow => Command::NextShow,
    };

    Ok(command)
}

fn parse_date_for(command: CommandKind, input: &str) -> Result<NaiveDate, ParseError> {
    parse_date(input).ok_or_else(|| ParseError {
        command,
        input: input.to_string(),
    })
}

/// Years a user can ask about. Signed and six-digit years are rejected.
const YEARS: RangeInclusive<i32> = 1..=9999;

/// Lenient calendar date parser for user input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        let year = input[0..4].parse().ok()?;
        let month = input[4..6].parse().ok()?;
        let day = input[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let leading_digits = input.chars().take_while(char::is_ascii_digit).count();
    let numeric_formats = if leading_digits == 4 {
        YEAR_FIRST_FORMATS
    } else {
        MONTH_FIRST_FORMATS
    };

    numeric_formats
        .iter()
        .chain(NAMED_MONTH_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .filter(|date| YEARS.contains(&date.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_setlist_short_us_date() {
        let command = parse_command(".setlist 8/31/21").unwrap();
        assert_eq!(command, Command::Setlist(date(2021, 8, 31)));
    }

    #[test]
    fn test_setlist_date_variants() {
        for input in [
            ".setlist 2021-08-31",
            ".setlist 8/31/2021",
            ".setlist 08-31-21",
            ".setlist 2021/8/31",
            ".setlist 20210831",
            ".setlist August 31, 2021",
            ".setlist aug 31 2021",
            ".setlist 31 August 2021",
            ".setlist   8/31/21   ",
        ] {
            assert_eq!(
                parse_command(input).unwrap(),
                Command::Setlist(date(2021, 8, 31)),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_two_digit_years_before_2000() {
        let command = parse_command(".setlist 12/31/99").unwrap();
        assert_eq!(command, Command::Setlist(date(1999, 12, 31)));
    }

    #[test]
    fn test_bad_date_is_tagged_with_command() {
        let err = parse_command(".setlist the one with the big jam").unwrap_err();
        assert_eq!(err.command, CommandKind::Setlist);
        assert_eq!(err.input, "the one with the big jam");

        let err = parse_command(".daysuntil").unwrap_err();
        assert_eq!(err.command, CommandKind::DaysUntil);
        assert_eq!(err.input, "");
    }

    #[test]
    fn test_invalid_calendar_day() {
        let err = parse_command(".setlist 2/30/21").unwrap_err();
        assert_eq!(err.command, CommandKind::Setlist);
    }

    #[test]
    fn test_years_outside_the_calendar_are_rejected() {
        for (input, kind) in [
            (".daysuntil 1/1/-262143", CommandKind::DaysUntil),
            (".daysuntil 12/31/262142", CommandKind::DaysUntil),
            (".setlist 0000-01-01", CommandKind::Setlist),
        ] {
            let err = parse_command(input).unwrap_err();
            assert_eq!(err.command, kind, "input: {}", input);
        }

        assert_eq!(
            parse_command(".daysuntil 12/31/9999").unwrap(),
            Command::DaysUntil(date(9999, 12, 31))
        );
        assert_eq!(
            parse_command(".setlist 1/1/0001").unwrap(),
            Command::Setlist(date(1, 1, 1))
        );
    }

    #[test]
    fn test_lastplayed_passes_title_through() {
        let command = parse_command(".lastplayed song title").unwrap();
        assert_eq!(command, Command::LastPlayed("song title".to_string()));

        let command = parse_command(".lastplayed   Colonel Forbin's Ascent  ").unwrap();
        assert_eq!(
            command,
            Command::LastPlayed("Colonel Forbin's Ascent".to_string())
        );
    }

    #[test]
    fn test_empty_title_is_allowed() {
        assert_eq!(
            parse_command(".lastplayed").unwrap(),
            Command::LastPlayed(String::new())
        );
        assert_eq!(
            parse_command(".longest ").unwrap(),
            Command::Longest(String::new())
        );
    }

    #[test]
    fn test_commands_without_arguments() {
        assert_eq!(parse_command(".random").unwrap(), Command::Random);
        assert_eq!(parse_command(".nextshow").unwrap(), Command::NextShow);
        assert_eq!(parse_command(".random please").unwrap(), Command::Random);
    }

    #[test]
    fn test_daysuntil() {
        let command = parse_command(".daysuntil 7/4/25").unwrap();
        assert_eq!(command, Command::DaysUntil(date(2025, 7, 4)));
        assert_eq!(command.kind(), Some(CommandKind::DaysUntil));
    }

    #[test]
    fn test_unknown_messages() {
        for input in ["hello", "", ".", ".randomly", ".setlists 8/31/21", "setlist 8/31/21"] {
            assert_eq!(parse_command(input).unwrap(), Command::Unknown, "input: {}", input);
        }
        assert_eq!(Command::Unknown.kind(), None);
    }

    #[test]
    fn test_command_inside_sentence() {
        let command = parse_command("what was played .setlist 12/30/97").unwrap();
        assert_eq!(command, Command::Setlist(date(1997, 12, 30)));
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(CommandKind::Longest.to_string(), ".longest");
    }
}

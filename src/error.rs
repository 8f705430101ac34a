use chrono::NaiveDate;
use thiserror::Error;

use crate::command::ParseError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to resolve show on {date}: {source}")]
    ShowLookup {
        date: NaiveDate,
        #[source]
        source: Box<AppError>,
    },

    #[error("phish.in API error: {0}")]
    PhishinApi(String),

    #[error("phish.net API error: {0}")]
    PhishnetApi(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

impl AppError {
    /// True when the error means "no matching record" rather than a failed request.
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::NotFound(_) => true,
            AppError::ShowLookup { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Errors caused by what the user typed or asked for, as opposed to a broken upstream.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::Parse(_)) || self.is_not_found()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;

    #[test]
    fn test_not_found_through_show_lookup() {
        let err = AppError::ShowLookup {
            date: NaiveDate::from_ymd_opt(1997, 12, 30).unwrap(),
            source: Box::new(AppError::NotFound("show on 1997-12-30".into())),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("1997-12-30"));

        let err = AppError::ShowLookup {
            date: NaiveDate::from_ymd_opt(1997, 12, 30).unwrap(),
            source: Box::new(AppError::PhishinApi("500".into())),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_errors_are_user_facing() {
        let err = AppError::from(ParseError {
            command: CommandKind::Setlist,
            input: "yesterday".into(),
        });
        assert!(err.is_user_facing());
        assert!(!AppError::Config("x".into()).is_user_facing());
    }
}

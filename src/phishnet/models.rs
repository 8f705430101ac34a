use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct ShowsResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub data: Vec<UpcomingShow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpcomingShow {
    #[serde(rename = "showid", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "showdate")]
    pub date: NaiveDate,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub permalink: String,
}

impl UpcomingShow {
    /// "Mountain View, CA", falling back to the country when there is no state.
    pub fn location(&self) -> String {
        let region = if self.state.is_empty() {
            &self.country
        } else {
            &self.state
        };

        [self.city.as_str(), region.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

#[cfg(test)]
impl UpcomingShow {
    pub fn mock(id: &str, date: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.parse().expect("test dates are ISO formatted"),
            venue: "Madison Square Garden".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            country: "USA".to_string(),
            permalink: format!("https://phish.net/setlists/{}", id),
        }
    }
}

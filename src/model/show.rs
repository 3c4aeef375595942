use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub type ShowId = i64;

/// Assigned by the backend. Anything it sends that we don't recognise is
/// kept as `Unknown` and displayed like an upcoming show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowStatus {
    #[default]
    Upcoming,
    Past,
    #[serde(other)]
    Unknown,
}

impl ShowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowStatus::Upcoming => "upcoming",
            ShowStatus::Past => "past",
            ShowStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Kept as sent; see `model::format` for parsing.
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub status: ShowStatus,
}

impl Show {
    pub fn is_past(&self) -> bool {
        self.status == ShowStatus::Past
    }

    /// Description, if there is anything worth printing.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Which subset of the calendar to ask for.
///
/// The chip selector only ever offers the first three. `Other` carries any
/// other value (from a deep link) through to the backend untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Upcoming,
    Past,
    All,
    Other(String),
}

impl StatusFilter {
    pub const CHOICES: [StatusFilter; 3] =
        [StatusFilter::Upcoming, StatusFilter::Past, StatusFilter::All];

    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::Upcoming => "upcoming",
            StatusFilter::Past => "past",
            StatusFilter::All => "all",
            StatusFilter::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::Upcoming => "Upcoming",
            StatusFilter::Past => "Past",
            StatusFilter::All => "All",
            StatusFilter::Other(s) => s,
        }
    }

    /// Value for the `status` query parameter. `None` means "don't send one".
    pub fn query_value(&self) -> Option<&str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Other(s) if s.is_empty() => None,
            other => Some(other.as_str()),
        }
    }

    /// Next chip to the right, wrapping. Unknown filters jump to the first chip.
    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::Upcoming => StatusFilter::Past,
            StatusFilter::Past => StatusFilter::All,
            StatusFilter::All | StatusFilter::Other(_) => StatusFilter::Upcoming,
        }
    }

    pub fn prev(&self) -> StatusFilter {
        match self {
            StatusFilter::Upcoming | StatusFilter::Other(_) => StatusFilter::All,
            StatusFilter::Past => StatusFilter::Upcoming,
            StatusFilter::All => StatusFilter::Past,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "upcoming" => StatusFilter::Upcoming,
            "past" => StatusFilter::Past,
            "all" => StatusFilter::All,
            other => StatusFilter::Other(other.to_string()),
        })
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// File: src/route.rs
use crate::model::{ShowId, StatusFilter};
use std::fmt;
use std::str::FromStr;

/// The three places the app can be.
///
/// Routes use the same paths as the web client: `/` (optionally
/// `/?status=past`), `/shows/:id` and `/tickets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Shows(StatusFilter),
    Show(ShowId),
    Tickets,
}

impl Default for Route {
    fn default() -> Self {
        Route::Shows(StatusFilter::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRouteError(String);

impl fmt::Display for ParseRouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown route '{}' (expected '/', '/shows/<id>' or '/tickets')",
            self.0
        )
    }
}

impl std::error::Error for ParseRouteError {}

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRouteError(s.to_string());
        let (path, query) = match s.trim().split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (s.trim(), None),
        };
        let path = path.trim_end_matches('/');

        match path {
            "" => {
                let filter = query
                    .into_iter()
                    .flat_map(|q| url::form_urlencoded::parse(q.as_bytes()))
                    .find(|(k, _)| k == "status")
                    .map(|(_, v)| v.parse::<StatusFilter>().unwrap_or_default())
                    .unwrap_or_default();
                Ok(Route::Shows(filter))
            }
            "/tickets" => Ok(Route::Tickets),
            _ => {
                let id = path.strip_prefix("/shows/").ok_or_else(err)?;
                id.parse::<ShowId>().map(Route::Show).map_err(|_| err())
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Shows(StatusFilter::Upcoming) => f.write_str("/"),
            Route::Shows(filter) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(filter.as_str().as_bytes()).collect();
                write!(f, "/?status={}", encoded)
            }
            Route::Show(id) => write!(f, "/shows/{}", id),
            Route::Tickets => f.write_str("/tickets"),
        }
    }
}

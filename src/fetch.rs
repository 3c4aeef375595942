// File: src/fetch.rs
// The loading -> success/error lifecycle every page runs for its data.
use crate::error::ApiError;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Tags one issued request so its response can be matched to the page state
/// that asked for it.
///
/// Tickets are unique for the life of the process and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn issue() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A `FetchState` plus the ticket of the one request allowed to settle it.
///
/// Starting a new request replaces the live ticket, so whatever the previous
/// one returns is dropped on arrival. `invalidate` does the same on teardown.
#[derive(Debug)]
pub struct Fetch<T> {
    state: FetchState<T>,
    live: Option<Ticket>,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Loading,
            live: None,
        }
    }
}

impl<T> Fetch<T> {
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Enters `Loading` (clearing any previous data or error) and returns
    /// the ticket the caller must attach to the request.
    pub fn begin(&mut self) -> Ticket {
        let ticket = Ticket::issue();
        self.live = Some(ticket);
        self.state = FetchState::Loading;
        ticket
    }

    pub fn invalidate(&mut self) {
        self.live = None;
    }

    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.live == Some(ticket)
    }

    /// Applies a response if `ticket` is still live. Returns whether it was applied.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, ApiError>, fallback: &str) -> bool {
        if !self.is_live(ticket) {
            return false;
        }
        self.live = None;
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(e) => {
                log::warn!("Request #{} failed: {}", ticket.value(), e);
                FetchState::Error(e.message_or(fallback))
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase() {
        let a = Ticket::issue();
        let b = Ticket::issue();
        assert!(b > a);
    }

    #[test]
    fn begin_then_settle() {
        let mut fetch: Fetch<Vec<u8>> = Fetch::default();
        let t = fetch.begin();
        assert!(fetch.state().is_loading());
        assert!(fetch.settle(t, Ok(vec![1, 2]), "oops"));
        assert_eq!(fetch.state().data(), Some(&vec![1, 2]));
        assert!(!fetch.is_live(t));
    }

    #[test]
    fn superseded_ticket_is_ignored() {
        let mut fetch: Fetch<&str> = Fetch::default();
        let old = fetch.begin();
        let new = fetch.begin();

        assert!(!fetch.settle(old, Ok("stale"), "oops"));
        assert!(fetch.state().is_loading());

        assert!(fetch.settle(new, Ok("fresh"), "oops"));
        assert_eq!(fetch.state(), &FetchState::Success("fresh"));

        // A late duplicate of the live one can't land twice.
        assert!(!fetch.settle(new, Ok("again"), "oops"));
        assert_eq!(fetch.state(), &FetchState::Success("fresh"));
    }

    #[test]
    fn invalidated_fetch_ignores_everything() {
        let mut fetch: Fetch<u32> = Fetch::default();
        let t = fetch.begin();
        fetch.invalidate();
        assert!(!fetch.settle(t, Ok(1), "oops"));
        assert!(fetch.state().is_loading());
    }

    #[test]
    fn errors_keep_their_message() {
        let mut fetch: Fetch<u32> = Fetch::default();
        let t = fetch.begin();
        fetch.settle(t, Err(ApiError::from_status(500, "boom")), "fallback");
        assert_eq!(fetch.state().error(), Some("boom"));
    }

    #[test]
    fn new_request_clears_previous_error() {
        let mut fetch: Fetch<u32> = Fetch::default();
        let t = fetch.begin();
        fetch.settle(t, Err(ApiError::Transport("down".into())), "fallback");
        assert!(fetch.state().error().is_some());
        fetch.begin();
        assert_eq!(fetch.state(), &FetchState::Loading);
    }
}

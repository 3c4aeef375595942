use super::Request;
use crate::error::ApiError;
use crate::fetch::{Fetch, FetchState, Ticket};
use crate::model::{Show, StatusFilter};

pub const LOAD_FAILED: &str = "Something went wrong while loading shows.";

/// What the list body should show. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Shows(&'a [Show]),
}

impl<'a> ListView<'a> {
    pub(crate) fn of(state: &'a FetchState<Vec<Show>>) -> Self {
        match state {
            FetchState::Loading => ListView::Loading,
            FetchState::Error(msg) => ListView::Error(msg),
            FetchState::Success(shows) if shows.is_empty() => ListView::Empty,
            FetchState::Success(shows) => ListView::Shows(shows),
        }
    }
}

/// The show calendar: a filter chip row and one card per show.
#[derive(Debug)]
pub struct ShowsPage {
    filter: StatusFilter,
    shows: Fetch<Vec<Show>>,
    selected: usize,
}

impl ShowsPage {
    pub fn mount(filter: StatusFilter) -> (Self, Request) {
        let mut page = Self {
            filter,
            shows: Fetch::default(),
            selected: 0,
        };
        let req = page.load();
        (page, req)
    }

    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    /// Re-fetches only when the filter actually changes.
    pub fn set_filter(&mut self, filter: StatusFilter) -> Option<Request> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        Some(self.load())
    }

    pub fn reload(&mut self) -> Request {
        self.load()
    }

    fn load(&mut self) -> Request {
        let ticket = self.shows.begin();
        self.selected = 0;
        Request::ListShows {
            ticket,
            filter: self.filter.clone(),
        }
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<Show>, ApiError>) -> bool {
        self.shows.settle(ticket, result, LOAD_FAILED)
    }

    pub fn teardown(&mut self) {
        self.shows.invalidate();
    }

    pub fn view(&self) -> ListView<'_> {
        ListView::of(self.shows.state())
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_show(&self) -> Option<&Show> {
        match self.view() {
            ListView::Shows(shows) => shows.get(self.selected),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        if let ListView::Shows(shows) = self.view() {
            self.selected = (self.selected + 1).min(shows.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

use super::Request;
use super::shows::{LOAD_FAILED, ListView};
use crate::error::ApiError;
use crate::fetch::{Fetch, Ticket};
use crate::model::{Show, StatusFilter};

/// Ticket promotion page. Always upcoming shows, fetched once on mount.
#[derive(Debug)]
pub struct TicketsPage {
    shows: Fetch<Vec<Show>>,
    selected: usize,
}

impl TicketsPage {
    pub fn mount() -> (Self, Request) {
        let mut page = Self {
            shows: Fetch::default(),
            selected: 0,
        };
        let req = page.reload();
        (page, req)
    }

    pub fn reload(&mut self) -> Request {
        let ticket = self.shows.begin();
        self.selected = 0;
        Request::ListShows {
            ticket,
            filter: StatusFilter::Upcoming,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_asks_for_upcoming() {
        let (_, req) = TicketsPage::mount();
        assert!(matches!(
            req,
            Request::ListShows { filter: StatusFilter::Upcoming, .. }
        ));
    }

    #[test]
    fn empty_and_error_states() {
        let (mut page, req) = TicketsPage::mount();
        page.apply(req.ticket(), Ok(vec![]));
        assert_eq!(page.view(), ListView::Empty);

        let req = page.reload();
        assert_eq!(page.view(), ListView::Loading);
        page.apply(req.ticket(), Err(ApiError::from_status(502, "")));
        assert_eq!(page.view(), ListView::Error("Request failed"));
    }

    #[test]
    fn results_after_teardown_are_dropped() {
        let (mut page, req) = TicketsPage::mount();
        page.teardown();
        assert!(!page.apply(req.ticket(), Ok(vec![])));
    }
}

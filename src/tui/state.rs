use crate::config::Config;
use crate::pages::{Page, Request, Response};
use crate::route::Route;

/// Everything the TUI draws from.
pub struct AppState {
    pub page: Page,
    pub message: String,
    pub show_full_help: bool,
    pub should_quit: bool,

    // Outbound links
    pub ticket_url: String,
    pub waitlist_url: String,
    pub api_url: String,
}

impl AppState {
    pub fn new(config: &Config, route: Route) -> (Self, Request) {
        let (page, req) = Page::mount(&route);
        let state = Self {
            page,
            message: format!("Connected to {}", config.api_url),
            show_full_help: false,
            should_quit: false,
            ticket_url: config.ticket_url.clone(),
            waitlist_url: config.waitlist_url.clone(),
            api_url: config.api_url.clone(),
        };
        (state, req)
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    /// Moves to `route`, returning whatever needs fetching.
    ///
    /// Staying on the same kind of page is a parameter change (new filter,
    /// new show id) and keeps the page; anything else tears the old page down.
    pub fn navigate(&mut self, route: Route) -> Option<Request> {
        log::debug!("Navigate {} -> {}", self.route(), route);
        match (&mut self.page, &route) {
            (Page::Shows(page), Route::Shows(filter)) => page.set_filter(filter.clone()),
            (Page::Detail(page), Route::Show(id)) => page.set_id(*id),
            (Page::Tickets(_), Route::Tickets) => None,
            _ => {
                self.page.teardown();
                let (page, req) = Page::mount(&route);
                self.page = page;
                Some(req)
            }
        }
    }

    pub fn reload(&mut self) -> Request {
        self.page.reload()
    }

    pub fn on_response(&mut self, response: Response) {
        let ticket = response.ticket();
        if !self.page.apply(response) {
            log::debug!("Dropped stale response #{}", ticket.value());
        }
    }
}

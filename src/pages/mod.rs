//! Page state machines.
//!
//! Pages never perform I/O. They hand back `Request`s tagged with a `Ticket`
//! and later receive the matching `Response`, which they apply only if the
//! ticket is still theirs. This keeps them synchronous and testable; the TUI's
//! network worker runs the requests.

pub mod detail;
pub mod form;
pub mod shows;
pub mod tickets;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::fetch::Ticket;
use crate::model::{EmailReceipt, EmailRequest, Show, ShowId, StatusFilter};
use crate::route::Route;

pub use detail::DetailPage;
pub use form::ContactForm;
pub use shows::ShowsPage;
pub use tickets::TicketsPage;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListShows { ticket: Ticket, filter: StatusFilter },
    GetShow { ticket: Ticket, id: ShowId },
    SendEmail { ticket: Ticket, email: EmailRequest },
}

#[derive(Debug)]
pub enum Response {
    Shows(Ticket, Result<Vec<Show>, ApiError>),
    Show(Ticket, Result<Option<Show>, ApiError>),
    EmailSent(Ticket, Result<Option<EmailReceipt>, ApiError>),
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Request::ListShows { ticket, .. }
            | Request::GetShow { ticket, .. }
            | Request::SendEmail { ticket, .. } => *ticket,
        }
    }

    pub async fn execute(self, client: &ApiClient) -> Response {
        match self {
            Request::ListShows { ticket, filter } => {
                Response::Shows(ticket, client.list_shows(Some(&filter)).await)
            }
            Request::GetShow { ticket, id } => Response::Show(ticket, client.get_show(id).await),
            Request::SendEmail { ticket, email } => {
                let result = client.send_email(&email).await;
                if let Ok(Some(receipt)) = &result {
                    log::info!("Email \"{}\" sent to {}", receipt.subject, receipt.to);
                }
                Response::EmailSent(ticket, result)
            }
        }
    }
}

impl Response {
    pub fn ticket(&self) -> Ticket {
        match self {
            Response::Shows(t, _) | Response::Show(t, _) | Response::EmailSent(t, _) => *t,
        }
    }
}

/// The page currently on screen. Exactly one exists at a time.
#[derive(Debug)]
pub enum Page {
    Shows(ShowsPage),
    Detail(DetailPage),
    Tickets(TicketsPage),
}

impl Page {
    /// Creates the page for `route` together with its initial fetch.
    pub fn mount(route: &Route) -> (Self, Request) {
        match route {
            Route::Shows(filter) => {
                let (page, req) = ShowsPage::mount(filter.clone());
                (Page::Shows(page), req)
            }
            Route::Show(id) => {
                let (page, req) = DetailPage::mount(*id);
                (Page::Detail(page), req)
            }
            Route::Tickets => {
                let (page, req) = TicketsPage::mount();
                (Page::Tickets(page), req)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Shows(p) => Route::Shows(p.filter().clone()),
            Page::Detail(p) => Route::Show(p.id()),
            Page::Tickets(_) => Route::Tickets,
        }
    }

    /// Returns `false` when the response belonged to nobody (stale or foreign).
    pub fn apply(&mut self, response: Response) -> bool {
        match (self, response) {
            (Page::Shows(p), Response::Shows(t, res)) => p.apply(t, res),
            (Page::Tickets(p), Response::Shows(t, res)) => p.apply(t, res),
            (Page::Detail(p), Response::Show(t, res)) => p.apply_show(t, res),
            (Page::Detail(p), Response::EmailSent(t, res)) => p.apply_email(t, res),
            _ => false,
        }
    }

    pub fn reload(&mut self) -> Request {
        match self {
            Page::Shows(p) => p.reload(),
            Page::Detail(p) => p.reload(),
            Page::Tickets(p) => p.reload(),
        }
    }

    /// Called when the page is about to be replaced. Anything still in flight
    /// is dropped when it lands.
    pub fn teardown(&mut self) {
        match self {
            Page::Shows(p) => p.teardown(),
            Page::Detail(p) => p.teardown(),
            Page::Tickets(p) => p.teardown(),
        }
    }
}

use super::Request;
use super::form::ContactForm;
use crate::error::ApiError;
use crate::fetch::{Fetch, FetchState, Ticket};
use crate::model::{EmailReceipt, Show, ShowId};

pub const NOT_FOUND: &str = "Show not found.";
pub const LOAD_FAILED: &str = "Could not load show.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailView<'a> {
    Loading,
    /// `reason` is the fetch error, if there was one.
    NotFound { reason: Option<&'a str> },
    Found(&'a Show),
}

/// One show plus the email form.
#[derive(Debug)]
pub struct DetailPage {
    id: ShowId,
    show: Fetch<Option<Show>>,
    form: ContactForm,
}

impl DetailPage {
    pub fn mount(id: ShowId) -> (Self, Request) {
        let mut page = Self {
            id,
            show: Fetch::default(),
            form: ContactForm::default(),
        };
        let req = page.reload();
        (page, req)
    }

    pub fn id(&self) -> ShowId {
        self.id
    }

    /// Switches to another show. Form contents are kept.
    pub fn set_id(&mut self, id: ShowId) -> Option<Request> {
        if id == self.id {
            return None;
        }
        self.id = id;
        Some(self.reload())
    }

    pub fn reload(&mut self) -> Request {
        Request::GetShow {
            ticket: self.show.begin(),
            id: self.id,
        }
    }

    pub fn apply_show(&mut self, ticket: Ticket, result: Result<Option<Show>, ApiError>) -> bool {
        self.show.settle(ticket, result, LOAD_FAILED)
    }

    pub fn apply_email(
        &mut self,
        ticket: Ticket,
        result: Result<Option<EmailReceipt>, ApiError>,
    ) -> bool {
        self.form.apply(ticket, result)
    }

    pub fn teardown(&mut self) {
        self.show.invalidate();
        self.form.abandon();
    }

    pub fn view(&self) -> DetailView<'_> {
        match self.show.state() {
            FetchState::Loading => DetailView::Loading,
            FetchState::Success(Some(show)) => DetailView::Found(show),
            FetchState::Success(None) => DetailView::NotFound { reason: None },
            FetchState::Error(msg) => DetailView::NotFound { reason: Some(msg) },
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// The form only exists once the show has loaded.
    pub fn submit(&mut self) -> Option<Request> {
        if !matches!(self.view(), DetailView::Found(_)) {
            return None;
        }
        self.form.submit(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShowStatus;
    use crate::pages::form::{SENT_MESSAGE, SubmissionStatus};

    fn show(id: ShowId, title: &str) -> Show {
        Show {
            id,
            title: title.to_string(),
            description: Some("Ninety minutes of sketches.".to_string()),
            location: "Main Stage".to_string(),
            start_time: Some("2025-05-02T19:30:00Z".to_string()),
            status: ShowStatus::Upcoming,
        }
    }

    #[test]
    fn loads_then_shows() {
        let (mut page, req) = DetailPage::mount(5);
        assert_eq!(page.view(), DetailView::Loading);
        assert!(matches!(req, Request::GetShow { id: 5, .. }));

        page.apply_show(req.ticket(), Ok(Some(show(5, "Sketch Night"))));
        assert!(matches!(page.view(), DetailView::Found(s) if s.title == "Sketch Night"));
    }

    #[test]
    fn missing_and_failed_are_both_not_found() {
        let (mut page, req) = DetailPage::mount(5);
        page.apply_show(req.ticket(), Ok(None));
        assert_eq!(page.view(), DetailView::NotFound { reason: None });

        let req = page.reload();
        page.apply_show(req.ticket(), Err(ApiError::from_status(404, "Show not found")));
        assert_eq!(
            page.view(),
            DetailView::NotFound {
                reason: Some("Show not found")
            }
        );
    }

    #[test]
    fn only_the_latest_id_lands() {
        let (mut page, first) = DetailPage::mount(1);
        let second = page.set_id(2).unwrap();

        assert!(page.apply_show(second.ticket(), Ok(Some(show(2, "Second")))));
        assert!(!page.apply_show(first.ticket(), Ok(Some(show(1, "First")))));

        assert_eq!(page.id(), 2);
        assert!(matches!(page.view(), DetailView::Found(s) if s.id == 2));
    }

    #[test]
    fn late_result_for_old_id_does_not_overwrite_loading() {
        let (mut page, first) = DetailPage::mount(1);
        page.set_id(2).unwrap();
        assert!(!page.apply_show(first.ticket(), Err(ApiError::Transport("slow".into()))));
        assert_eq!(page.view(), DetailView::Loading);
    }

    #[test]
    fn cannot_submit_before_show_loads() {
        let (mut page, _) = DetailPage::mount(3);
        page.form_mut().guest_name = "Ada".into();
        page.form_mut().guest_email = "ada@example.com".into();
        assert!(page.submit().is_none());
    }

    #[test]
    fn submit_uses_route_id() {
        let (mut page, req) = DetailPage::mount(3);
        page.apply_show(req.ticket(), Ok(Some(show(3, "Improv"))));
        page.form_mut().guest_name = "Ada".into();
        page.form_mut().guest_email = "ada@example.com".into();

        let send = page.submit().unwrap();
        assert!(matches!(&send, Request::SendEmail { email, .. } if email.show_id == 3));

        assert!(page.apply_email(send.ticket(), Ok(None)));
        assert_eq!(
            page.form().status(),
            &SubmissionStatus::Success(SENT_MESSAGE.into())
        );
    }

    #[test]
    fn changing_id_keeps_form_values() {
        let (mut page, _) = DetailPage::mount(3);
        page.form_mut().guest_name = "Ada".into();
        page.set_id(4);
        assert_eq!(page.form().guest_name, "Ada");
    }
}

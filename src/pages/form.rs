// File: src/pages/form.rs
// "Email the show details" form on the detail page.
use super::Request;
use crate::error::ApiError;
use crate::fetch::Ticket;
use crate::model::{EmailReceipt, EmailRequest, ShowId};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const SENT_MESSAGE: &str = "Email sent! Check the guest inbox for details.";
pub const SEND_FAILED: &str = "Failed to send email.";

// Same grammar browsers apply to <input type="email">.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

pub fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    GuestName,
    GuestEmail,
    Message,
    Submit,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::GuestName => Field::GuestEmail,
            Field::GuestEmail => Field::Message,
            Field::Message => Field::Submit,
            Field::Submit => Field::GuestName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::GuestName => Field::Submit,
            Field::GuestEmail => Field::GuestName,
            Field::Message => Field::GuestEmail,
            Field::Submit => Field::Message,
        }
    }

    pub fn is_text(self) -> bool {
        self != Field::Submit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    None,
    Success(String),
    Error(String),
}

/// Why a submission was blocked before it left the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    MissingName,
    MissingEmail,
    MalformedEmail,
}

impl Invalid {
    pub fn field(self) -> Field {
        match self {
            Invalid::MissingName => Field::GuestName,
            Invalid::MissingEmail | Invalid::MalformedEmail => Field::GuestEmail,
        }
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Invalid::MissingName => "Please fill out the guest name.",
            Invalid::MissingEmail => "Please fill out the guest email.",
            Invalid::MalformedEmail => "Please enter a valid email address.",
        })
    }
}

#[derive(Debug, Default)]
pub struct ContactForm {
    pub guest_name: String,
    pub guest_email: String,
    pub message: String,
    focus: Field,
    sending: bool,
    status: SubmissionStatus,
    invalid: Option<Invalid>,
    pending: Option<Ticket>,
}

impl ContactForm {
    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn invalid(&self) -> Option<Invalid> {
        self.invalid
    }

    pub fn submit_label(&self) -> &'static str {
        if self.sending { "Sending…" } else { "Send email" }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::GuestName => Some(&mut self.guest_name),
            Field::GuestEmail => Some(&mut self.guest_email),
            Field::Message => Some(&mut self.message),
            Field::Submit => None,
        }
    }

    /// Types into the focused field. Returns `false` if the button has focus.
    pub fn input(&mut self, c: char) -> bool {
        // Single-line inputs drop newlines like a browser would.
        if c == '\n' && self.focus != Field::Message {
            return false;
        }
        let Some(text) = self.focused_text() else {
            return false;
        };
        text.push(c);
        self.invalid = None;
        true
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn validate(&self) -> Result<(), Invalid> {
        if self.guest_name.is_empty() {
            return Err(Invalid::MissingName);
        }
        let email = self.guest_email.trim();
        if email.is_empty() {
            return Err(Invalid::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(Invalid::MalformedEmail);
        }
        Ok(())
    }

    /// Starts a submission for `show_id`.
    ///
    /// Returns `None` while a previous submission is still in flight, or when
    /// validation fails (the failing field gets focus, status is untouched).
    pub fn submit(&mut self, show_id: ShowId) -> Option<Request> {
        if self.sending {
            return None;
        }
        if let Err(invalid) = self.validate() {
            self.invalid = Some(invalid);
            self.focus = invalid.field();
            return None;
        }

        let ticket = Ticket::issue();
        self.pending = Some(ticket);
        self.sending = true;
        self.invalid = None;
        self.status = SubmissionStatus::None;

        let message = if self.message.is_empty() {
            None
        } else {
            Some(self.message.clone())
        };
        Some(Request::SendEmail {
            ticket,
            email: EmailRequest {
                show_id,
                guest_name: self.guest_name.clone(),
                guest_email: self.guest_email.trim().to_string(),
                message,
            },
        })
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Option<EmailReceipt>, ApiError>) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        match result {
            Ok(_) => {
                self.status = SubmissionStatus::Success(SENT_MESSAGE.to_string());
                self.guest_name.clear();
                self.guest_email.clear();
                self.message.clear();
                self.focus = Field::GuestName;
            }
            Err(e) => {
                log::warn!("Sending email failed: {}", e);
                self.status = SubmissionStatus::Error(e.message_or(SEND_FAILED));
            }
        }
        self.sending = false;
        true
    }

    /// Forget the in-flight submission, if any. Its response will be ignored.
    pub fn abandon(&mut self) {
        self.pending = None;
        self.sending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            guest_name: "Ada".into(),
            guest_email: "ada@example.com".into(),
            message: "Front row please".into(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn email_grammar() {
        assert!(looks_like_email("ada@example.com"));
        assert!(looks_like_email("a.b+c@localhost"));
        assert!(!looks_like_email("ada"));
        assert!(!looks_like_email("ada@"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@exa mple.com"));
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = ContactForm::default();
        form.input('A');
        form.focus_next();
        form.input('b');
        form.focus_next();
        form.input('\n');
        form.focus_next();
        assert!(!form.input('x'));
        assert_eq!(form.guest_name, "A");
        assert_eq!(form.guest_email, "b");
        assert_eq!(form.message, "\n");
    }

    #[test]
    fn newlines_are_dropped_in_single_line_fields() {
        let mut form = ContactForm::default();
        assert!(!form.input('\n'));
        assert!(form.guest_name.is_empty());
    }

    #[test]
    fn invalid_forms_do_not_submit() {
        let mut form = ContactForm {
            guest_email: "ada@example.com".into(),
            focus: Field::Submit,
            ..ContactForm::default()
        };
        assert!(form.submit(1).is_none());
        assert_eq!(form.invalid(), Some(Invalid::MissingName));
        assert_eq!(form.focus(), Field::GuestName);
        assert!(!form.is_sending());

        form.guest_name = "Ada".into();
        form.guest_email = "not-an-email".into();
        assert!(form.submit(1).is_none());
        assert_eq!(form.invalid(), Some(Invalid::MalformedEmail));
        assert_eq!(form.status(), &SubmissionStatus::None);
    }

    #[test]
    fn submit_builds_one_request_with_numeric_id() {
        let mut form = filled();
        let req = form.submit(12).unwrap();
        let Request::SendEmail { email, .. } = &req else {
            panic!("expected SendEmail");
        };
        assert_eq!(email.show_id, 12);
        assert_eq!(email.guest_name, "Ada");
        assert_eq!(email.message.as_deref(), Some("Front row please"));

        // Button is disabled: a second submit does nothing.
        assert!(form.is_sending());
        assert!(form.submit(12).is_none());
        assert_eq!(form.submit_label(), "Sending…");
    }

    #[test]
    fn empty_message_is_sent_as_none() {
        let mut form = filled();
        form.message.clear();
        let Some(Request::SendEmail { email, .. }) = form.submit(1) else {
            panic!("expected SendEmail");
        };
        assert_eq!(email.message, None);
    }

    #[test]
    fn success_resets_fields() {
        let mut form = filled();
        let req = form.submit(1).unwrap();
        assert!(form.apply(req.ticket(), Ok(None)));

        assert!(!form.is_sending());
        assert_eq!(form.status(), &SubmissionStatus::Success(SENT_MESSAGE.into()));
        assert!(form.guest_name.is_empty());
        assert!(form.guest_email.is_empty());
        assert!(form.message.is_empty());
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = filled();
        let req = form.submit(1).unwrap();
        form.apply(
            req.ticket(),
            Err(ApiError::from_status(422, "Email could not be sent")),
        );

        assert!(!form.is_sending());
        assert_eq!(
            form.status(),
            &SubmissionStatus::Error("Email could not be sent".into())
        );
        assert_eq!(form.guest_name, "Ada");
        assert_eq!(form.message, "Front row please");
    }

    #[test]
    fn resubmitting_clears_the_old_status() {
        let mut form = filled();
        let req = form.submit(1).unwrap();
        form.apply(req.ticket(), Err(ApiError::Transport("down".into())));
        assert!(matches!(form.status(), SubmissionStatus::Error(_)));

        form.submit(1).unwrap();
        assert_eq!(form.status(), &SubmissionStatus::None);
    }

    #[test]
    fn sending_flag_flips_back_exactly_once() {
        let mut form = filled();
        let req = form.submit(1).unwrap();
        assert!(form.is_sending());
        assert!(form.apply(req.ticket(), Ok(None)));
        assert!(!form.is_sending());
        // A duplicate completion is not applied.
        assert!(!form.apply(req.ticket(), Ok(None)));
    }

    #[test]
    fn abandoned_submission_is_ignored() {
        let mut form = filled();
        let req = form.submit(1).unwrap();
        form.abandon();
        assert!(!form.apply(req.ticket(), Ok(None)));
        assert_eq!(form.guest_name, "Ada");
    }
}

pub mod email;
pub mod format;
pub mod show;

pub use email::{EmailReceipt, EmailRequest};
pub use show::{Show, ShowId, ShowStatus, StatusFilter};

use crate::pages::{Request, Response};

/// UI loop -> network worker.
#[derive(Debug)]
pub enum Action {
    // Network
    Fetch(Request),

    // Lifecycle
    Quit,
}

/// Network worker -> UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Response(Response),
}

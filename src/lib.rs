pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod pages;
pub mod paths;
pub mod route;

#[cfg(feature = "tui")]
pub mod tui;

//! Developer support programs for the language guide: a fixture server that
//! answers with pre-recorded dictionary pages, a server that returns one static
//! document for every request, and a bot that generates search traffic and
//! synthetic telemetry for a single session.

mod error;
mod http;

pub mod config;
pub mod logging;
pub mod server;
pub mod service;
pub mod telemetry;

pub use error::Error;
pub use server::{Server, State};

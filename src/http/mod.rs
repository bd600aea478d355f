//! Thin layer over [`hyper`] shared by the servers and the telemetry bot.

pub(crate) mod body;
pub(crate) mod client;
pub(crate) mod response;

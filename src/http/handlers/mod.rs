//! Request handlers, one module per concern.
//!
//! Every handler is independent; the only shared state is the probe flags,
//! the on-disk content store and the optional config snapshot provider, all
//! reached through [`AppState`](crate::http::server::AppState).

pub mod backend;
pub mod configs;
pub mod echo;
pub mod info;
pub mod job;
pub mod probes;
pub mod store;

//! Generation module — the request-orchestration layer.
//!
//! `client` normalizes external-generator replies into outcomes; `handlers`
//! exposes the generate/optimize operations over HTTP.

pub mod client;
pub mod handlers;

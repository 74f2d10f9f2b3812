// Assessment: wires extraction, inference and recommendations into one
// request-scoped pipeline, plus the HTTP handlers that expose it.

pub mod handlers;
pub mod recommendations;
pub mod service;

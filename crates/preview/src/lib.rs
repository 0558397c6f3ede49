#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Served preview host.
//!
//! [`ServedPreview`] is the [`PreviewHost`](easel_engine::PreviewHost) handed to
//! the playground. Every render retires the previous generation and publishes a
//! new one. [`PreviewSite`] serves the current generation over HTTP:
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | redirect to `/playground` |
//! | `GET /playground` | host page with a sandboxed iframe |
//! | `GET /playground/frame/{generation}` | the document, or `410 Gone` once retired |
//! | `GET /playground/events` | server-sent `generation` events |
//! | `GET /playground/export` | the document as an attachment |
//!
//! Frames are served with a `Content-Security-Policy: sandbox` header as well as
//! the iframe `sandbox` attribute, so the document lands in an opaque origin
//! even when opened directly.

mod host;
mod page;
mod site;

pub use host::ServedPreview;
pub use site::PreviewSite;

/// Mount point of the playground.
pub const PLAYGROUND_ROUTE: &str = "/playground";

#[cfg(test)]
mod tests;

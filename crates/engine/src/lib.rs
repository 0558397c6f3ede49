#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Live playground engine.
//!
//! Holds three editable sources (markup, style, script), composes them into
//! one self-contained document and hands that document to a sandboxed
//! preview host after an idle window.
//!
//! # Main Types
//!
//! - [`EditorState`] - the three buffers plus the active tab
//! - [`Composer`] - pure assembly of buffers into a [`ComposedDocument`]
//! - [`DebouncedRenderer`] - Idle / Pending state machine driving a [`PreviewHost`]
//! - [`Playground`] - one session tying the above together
//! - [`PlaygroundHandle`] - async front door to a playground running as a task
//!
//! # Data flow
//!
//! ```text
//! edit ──▶ EditorState ──▶ RenderSchedule (Pending) ──timer──▶ Composer ──▶ PreviewHost
//!                                  ▲                                          │
//!           run now ───────────────┘ (cancel + compose immediately)           ▼
//!                                                                    new generation
//! ```

pub mod buffer;
/// System clipboard access for copying raw buffers.
pub mod clipboard;
pub mod compose;
/// Export of composed documents as downloadable artifacts.
pub mod export;
/// Dismissible notices for contained failures.
pub mod notifications;
pub mod playground;
/// Preview host capability.
pub mod preview;
pub mod render;
/// Default sample content.
pub mod seed;
#[cfg(test)]
mod test_support;

pub use buffer::{EditorSnapshot, EditorState, SourceBuffer};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use compose::{ComposeOptions, ComposedDocument, Composer, compose};
pub use easel_primitives::{ParseSourceKindError, SandboxPolicy, SourceKind};
pub use easel_worker::Generation;
pub use export::{ExportArtifact, ExportError, HTML_MIME, export_document};
pub use notifications::{Notice, NoticeCenter, NoticeLevel};
pub use playground::{Playground, PlaygroundError, PlaygroundHandle, PlaygroundOptions, PlaygroundStatus, spawn_playground};
pub use preview::{PreviewError, PreviewHost};
pub use render::{DebouncedRenderer, RenderPhase, RenderReport, RenderSchedule, RenderStats, RenderTrigger};
pub use seed::SeedContent;

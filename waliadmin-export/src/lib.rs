//! # waliadmin-export
//!
//! Gets rendered documents out of the engine: envelope wrapping, clipboard
//! transfer, hash-gated file export, export diff and export status.
//!
//! Call [`pipeline::run`] to export one or all templates to the export
//! directory, or [`transfer`] to place a wrapped document on a clipboard.

pub mod clipboard;
pub mod diff;
pub mod envelope;
pub mod error;
pub mod hash_store;
pub mod pipeline;
pub mod status;
pub mod writer;

pub use clipboard::{transfer, Clipboard, MemoryClipboard, SystemClipboard};
pub use envelope::wrap;
pub use error::{ClipboardError, ExportError};
pub use pipeline::{ExportOptions, ExportScope};
pub use status::{DocumentStatus, ExportStatus, StatusReport};
pub use writer::{ExportedDocument, WriteResult};

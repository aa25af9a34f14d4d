//! Export seam for turning the board into a document artifact.
//!
//! Rasterizing and encoding are left to the host; the board only hands over
//! what to draw and what to call the result.

use crate::snapshot::BoardSnapshot;

/// Default name of the exported document.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "canvas.pdf";

/// What an exporter is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub file_name: String,
    pub snapshot: BoardSnapshot,
}

/// Produces a document from a board snapshot.
///
/// Export is fire-and-forget: the board does not wait on completion and
/// nothing else depends on it.
pub trait Exporter {
    fn export(&mut self, request: ExportRequest);
}

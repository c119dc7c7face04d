//! # ganttboard-render
//!
//! Presentation back ends for the filtered record set.
//!
//! This crate provides:
//! - Unicode timeline rendering (Gantt-style bars per activity)
//! - Text table rendering of the canonical columns
//! - The `Renderer` trait for custom back ends
//!
//! Renderers are pure: they read records and produce a string, never
//! mutating or reordering the data they are given.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ganttboard_render::{Renderer, TableRenderer, TimelineRenderer};
//!
//! let chart = TimelineRenderer::new().width(80).render(&records)?;
//! let table = TableRenderer::new().render(&records)?;
//! println!("{chart}\n{table}");
//! ```

pub mod table;
pub mod timeline;

pub use table::TableRenderer;
pub use timeline::TimelineRenderer;

use ganttboard_core::Record;
use thiserror::Error;

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render: record set is empty")]
    EmptyRecordSet,

    #[error("format error: {0}")]
    Format(String),
}

/// Output rendering over a filtered, ordered record set.
pub trait Renderer {
    type Output;

    /// Render the records to the output format.
    fn render(&self, records: &[Record]) -> Result<Self::Output, RenderError>;
}

//! Dataset input and report output: JSON in, DOT, CSV and terminal tables out.

pub mod csv;
pub mod dot;
pub mod input;
pub mod terminal;

pub use dot::{DotSerializer, EdgeStyle, HeatBand};
pub use input::{ProjectDataset, ProjectRecord, ReferenceRecord};
pub use terminal::SummaryRenderer;

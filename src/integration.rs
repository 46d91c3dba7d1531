//! Integration module for connecting upstream segmentation output with the
//! trajectory assembler.
//!
//! This module provides the provider trait, file-backed providers and the
//! pipeline that drives frames through the assembler.

mod directory;
pub mod listing;
mod pipeline;
mod source;

pub use directory::FrameDirectory;
pub use listing::FrameListing;
pub use pipeline::TrajectoryPipeline;
pub use source::CentroidSource;

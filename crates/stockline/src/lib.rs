//! Load stockpile height streams and build stockline surfaces.
//!
//! This crate wraps the synchronous core in `stockline_mesh` with the parts
//! an application needs around it: configuration, byte sources for the raw
//! height streams, logging of each pipeline stage, and running the pipeline
//! on a worker thread so the caller never blocks on triangulation.
//!
//! # Design principles
//!
//! - **Runtime-agnostic**: Returns boxed futures and `async_channel`
//!   receivers, works with any executor
//! - **Sync building**: The pipeline itself is synchronous; this crate
//!   decides where it runs
//! - **Isolated failures**: One bad stockline never takes down the yard
//!
//! # Example
//!
//! ```ignore
//! use stockline::{FileSource, Yard, YardConfig};
//!
//! let config = YardConfig::from_json(&std::fs::read_to_string("yard.json")?)?;
//! let yard = Yard::from_config(config)?;
//!
//! for (name, surface) in yard.load(&FileSource::new("data")).await {
//!     let surface = surface?;
//!     println!("{name}: {} triangles", surface.mesh.triangle_count());
//! }
//! ```

pub mod config;
mod error;
pub mod pipeline;
pub mod source;
pub mod worker;
pub mod yard;

pub use config::{SegmentationConfig, StocklineConfig, YardConfig};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, Surface};
pub use source::{ByteSource, FetchFuture, FileSource, MemorySource};
pub use worker::{PipelineTask, spawn};
pub use yard::{Yard, YardEntry, load_stockline};

// Re-export core types for convenience.
pub use stockline_mesh::{
    Bounds, ColorBands, GridDimensions, HeightBand, MeshError, SegmentShading, SurfaceMesh,
    TriangulatorKind,
};

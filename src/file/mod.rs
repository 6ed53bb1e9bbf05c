//! File-level minification
//!
//! - [`naming`]: where an artifact goes and how to recognize one
//! - [`processor`]: text reads and atomic artifact writes
//! - [`job`]: one source file in, one artifact out

pub mod job;
pub mod metrics;
pub mod naming;
pub mod processor;

pub use job::{JobError, JobReport, MinificationJob, PipelineSettings, SkipReason};
pub use metrics::SizeMetrics;
pub use naming::{ArtifactNaming, InvalidSuffix, DEFAULT_SUFFIX};
pub use processor::FileProcessor;

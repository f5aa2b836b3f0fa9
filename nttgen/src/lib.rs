//! Parameter and topology generator for pipelined NTT accelerators.
//!
//! A run validates a [`GeneratorConfig`], checks that the requested
//! parallelism maps onto whole cores ([`ParallelismPlan`]), derives the root
//! pair and bit-reversed twiddle table of the transform, expands the temporal
//! stages into a [`PipelineTopology`] and finally renders the link
//! configuration, header and kernel artifacts.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod feasibility;
pub mod generator;
pub mod params;
pub mod render;
pub mod topology;

pub use config::GeneratorConfig;
pub use connectivity::Connectivity;
pub use error::{Error, Result};
pub use feasibility::ParallelismPlan;
pub use generator::{Artifacts, Generator};
pub use params::{CoeffType, TransformParameters};
pub use topology::{PipelineTopology, StageNode, Stream};

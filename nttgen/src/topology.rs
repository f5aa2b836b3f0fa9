//! Chain of temporal pipeline stages.
//!
//! Spatial parallelism B covers log2(B) + 1 butterfly layers; each of the
//! remaining log2(N) - (log2(B) + 1) layers becomes one temporal stage. Stages
//! are linked by pairs of streams (the two outputs of a radix-2 butterfly),
//! forming a linear dataflow graph from the primary input pair to the
//! primary output pair.

use std::fmt;

use crate::error::{Error, Result};

/// Symbol passed to every stage as its per-invocation sample count.
pub const SAMPLES: &str = "SAMPLES";

/// One end of a link between two stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Primary input stream `lane` of the temporal section.
    Input(u8),
    /// Stream `lane` entering stage `boundary` from stage `boundary - 1`.
    Intermediate { boundary: usize, lane: u8 },
    /// Primary output stream `lane` of the temporal section.
    Output(u8),
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Input(lane) => write!(f, "input_stream{lane}"),
            Stream::Intermediate { boundary, lane } => write!(f, "streams{boundary}_{lane}"),
            Stream::Output(lane) => write!(f, "output_stream{lane}"),
        }
    }
}

/// A pair of streams carrying the two halves of the butterfly data path.
pub type StreamPair = [Stream; 2];

fn pair(f: impl Fn(u8) -> Stream) -> StreamPair {
    [f(0), f(1)]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageNode {
    pub index: usize,
    pub inputs: StreamPair,
    pub outputs: StreamPair,
    pub samples: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineTopology {
    log_n: u32,
    log_b: u32,
    stages: Vec<StageNode>,
}

impl PipelineTopology {
    pub fn synthesize(n: usize, spatial_width: usize) -> Result<Self> {
        if !n.is_power_of_two() {
            return Err(Error::invalid_arg("n", format!("{} is not a power of two", n)));
        }
        if !spatial_width.is_power_of_two() || spatial_width > n {
            return Err(Error::invalid_arg(
                "spatial_width",
                format!("{} is not a power of two <= n = {}", spatial_width, n),
            ));
        }

        let log_n: u32 = n.ilog2();
        let log_b: u32 = spatial_width.ilog2();

        // log_b < log_n - 1 <=> stage count >= 1.
        if log_n <= log_b + 1 {
            return Err(Error::NoTemporalStages { log_n, log_b });
        }
        let stage_count: usize = (log_n - (log_b + 1)) as usize;

        let stages: Vec<StageNode> = (0..stage_count)
            .map(|index| StageNode {
                index,
                inputs: match index {
                    0 => pair(Stream::Input),
                    _ => pair(|lane| Stream::Intermediate {
                        boundary: index,
                        lane,
                    }),
                },
                outputs: if index + 1 == stage_count {
                    pair(Stream::Output)
                } else {
                    pair(|lane| Stream::Intermediate {
                        boundary: index + 1,
                        lane,
                    })
                },
                samples: SAMPLES,
            })
            .collect();

        Ok(Self {
            log_n,
            log_b,
            stages,
        })
    }

    pub fn log_n(&self) -> u32 {
        self.log_n
    }

    pub fn log_b(&self) -> u32 {
        self.log_b
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stages(&self) -> &[StageNode] {
        &self.stages
    }

    /// Stream pairs declared between consecutive stages, in pipeline order.
    pub fn intermediate_streams(&self) -> Vec<StreamPair> {
        self.stages
            .iter()
            .skip(1)
            .map(|stage| stage.inputs)
            .collect()
    }
}

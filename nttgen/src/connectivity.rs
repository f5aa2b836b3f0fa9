use crate::error::{Error, MAX_CHANNELS, Result};

/// Kernel instance the ports belong to.
pub const KERNEL_INSTANCE: &str = "ntt_1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Coefficients read by the kernel (`x_i`).
    Input,
    /// Coefficients written by the kernel (`y_i`).
    Output,
}

/// Binding of one kernel port to one memory bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortBinding {
    pub direction: Direction,
    pub port: usize,
    pub bank: usize,
}

impl PortBinding {
    pub fn port_name(&self) -> String {
        match self.direction {
            Direction::Input => format!("x_{}", self.port),
            Direction::Output => format!("y_{}", self.port),
        }
    }
}

/// Input ports use banks [0, num_channels), output ports use
/// [num_channels, 2 * num_channels).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connectivity {
    num_channels: usize,
    bindings: Vec<PortBinding>,
}

impl Connectivity {
    pub fn new(num_channels: usize) -> Result<Self> {
        if !(1..=MAX_CHANNELS).contains(&num_channels) {
            return Err(Error::InvalidChannelCount { num_channels });
        }

        let inputs = (0..num_channels).map(|i| PortBinding {
            direction: Direction::Input,
            port: i,
            bank: i,
        });
        let outputs = (0..num_channels).map(|i| PortBinding {
            direction: Direction::Output,
            port: i,
            bank: i + num_channels,
        });

        Ok(Self {
            num_channels,
            bindings: inputs.chain(outputs).collect(),
        })
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn bindings(&self) -> &[PortBinding] {
        &self.bindings
    }
}

pub mod dense;
pub mod nonlinearity;

use crate::{error::Result, port::Port};

pub use dense::Dense;
pub use nonlinearity::{Activation, Identity, Nonlinearity, Relu, Sigmoid, Tanh};

/// A stage of the pipeline driven by [`crate::network::Network`].
///
/// A node reads the [`Port`] written by its predecessor and owns exactly one output port that
/// its successor reads. `forward` moves values downstream through those ports, `backward` moves
/// errors upstream.
pub trait Node {
    /// Dimension this node expects on its input port.
    fn input_dim(&self) -> usize;

    /// The port this node reads in `forward` and writes the error of in `backward`.
    fn input(&self) -> &Port;

    /// The port this node writes in `forward` and reads the error of in `backward`.
    fn output(&self) -> &Port;

    /// Compute the output value from the input value. Must not touch any error buffer.
    fn forward(&mut self) -> Result<()>;

    /// Write the input error from the output error and accumulate the gradients `update` needs.
    fn backward(&mut self) -> Result<()>;

    /// Clear recurrent state. Learned parameters are kept.
    fn reset(&mut self) {}

    /// Apply the gradients accumulated since the last `clear_error`.
    fn update(&mut self) {}

    /// Zero accumulated gradients and the output error.
    fn clear_error(&mut self) {
        self.output().clear_error();
    }
}

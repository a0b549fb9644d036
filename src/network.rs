use log::{debug, trace};
use ndarray::ArrayView1;

use crate::{
    error::{Error, Result, ShapeError},
    loss::mean_squared,
    node::Node,
    port::Port,
    Float, Vector,
};

/// A linear pipeline of [`Node`]s fed through a single input [`Port`].
///
/// Nodes run forward in insertion order and backward in reverse insertion order. The network
/// owns its nodes and its input port; the output port belongs to the last node.
pub struct Network {
    input: Port,
    nodes: Vec<Box<dyn Node>>,
}

impl Network {
    /// Create an empty network whose input port has dimension `input_size`.
    pub fn new(input_size: usize) -> Self {
        Self {
            input: Port::new(input_size),
            nodes: Vec::new(),
        }
    }

    pub fn input_port(&self) -> &Port {
        &self.input
    }

    /// The port the next node should read: the output of the last node, or the input port
    /// while the network is empty.
    pub fn output_port(&self) -> &Port {
        self.nodes
            .last()
            .map_or(&self.input, |node| node.output())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `node` to the end of the pipeline.
    ///
    /// The node's input dimension is checked against the current output port right away, so a
    /// miswired pipeline is rejected here rather than at the first `predict`. The node must also
    /// read that very port, not another one of the same size. The network is unchanged when
    /// either check fails.
    pub fn add_node<N>(&mut self, node: N) -> Result<()>
    where
        N: Node + 'static,
    {
        ShapeError::check("add_node", self.output_port().dim(), node.input_dim())?;
        if !node.input().shares_buffer(self.output_port()) {
            return Err(Error::Unwired {
                index: self.nodes.len(),
            });
        }
        debug!(
            "node {} added: {} -> {}",
            self.nodes.len(),
            node.input_dim(),
            node.output().dim()
        );
        self.nodes.push(Box::new(node));
        Ok(())
    }

    /// Build a node wired to the current output port and append it.
    ///
    /// ```
    /// use portnet::{network::Network, node::{Dense, Nonlinearity, Sigmoid}, optimizer::GradientDescent};
    ///
    /// let mut network = Network::new(2);
    /// network.add_node_with(|port| Dense::new(port, 3, GradientDescent::new(0.1))).unwrap();
    /// network.add_node_with(|port| Nonlinearity::new(port, Sigmoid)).unwrap();
    /// assert_eq!(3, network.output_port().dim());
    /// ```
    pub fn add_node_with<N, F>(&mut self, build: F) -> Result<()>
    where
        N: Node + 'static,
        F: FnOnce(&Port) -> N,
    {
        let node = build(self.output_port());
        self.add_node(node)
    }

    fn last(&self) -> Result<&dyn Node> {
        self.nodes.last().map(|node| &**node).ok_or(Error::EmptyNetwork)
    }

    /// Run `input` through every node and return a copy of the last node's output value.
    ///
    /// The input port is left untouched when `input` has the wrong dimension.
    pub fn predict(&mut self, input: ArrayView1<Float>) -> Result<Vector> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        ShapeError::check("predict input", self.input.dim(), input.len())?;
        self.input.set_value(input)?;

        for (i, node) in self.nodes.iter_mut().enumerate() {
            trace!("forward node {i}");
            node.forward()?;
        }

        let output = self.last()?.output().value().clone();
        Ok(output)
    }

    /// Clear recurrent state of every node. Parameters and topology are kept.
    pub fn reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset();
        }
    }

    /// Backpropagate `prediction - target`, using the prediction of the last `predict` call.
    /// Returns the mean squared error.
    pub fn set_expected_output(&mut self, target: ArrayView1<Float>) -> Result<Float> {
        let error = {
            let output = self.last()?.output();
            ShapeError::check("expected output", output.dim(), target.len())?;
            &*output.value() - &target
        };
        self.set_error(error.view())
    }

    /// Inject `error` into the output port and backpropagate it through every node, last node
    /// first. Returns the mean of the squared components of `error`.
    pub fn set_error(&mut self, error: ArrayView1<Float>) -> Result<Float> {
        let last = self.last()?;
        ShapeError::check("set_error", last.output().dim(), error.len())?;
        last.output().set_error(error)?;

        for (i, node) in self.nodes.iter_mut().enumerate().rev() {
            trace!("backward node {i}");
            node.backward()?;
        }

        Ok(mean_squared(error))
    }

    /// Let every node apply its accumulated gradient, then clear it before moving on.
    pub fn update(&mut self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        for node in self.nodes.iter_mut() {
            node.update();
            node.clear_error();
        }
        self.input.clear_error();
        Ok(())
    }

    /// One full train step: `predict`, `set_expected_output`, then `update`.
    pub fn train_sample(
        &mut self,
        input: ArrayView1<Float>,
        target: ArrayView1<Float>,
    ) -> Result<Float> {
        self.predict(input)?;
        let loss = self.set_expected_output(target)?;
        self.update()?;
        Ok(loss)
    }
}

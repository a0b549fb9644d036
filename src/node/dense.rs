use log::debug;
use ndarray::{Array, Array2, Axis};
use ndarray_rand::{rand_distr::Uniform, RandomExt};

use crate::{
    error::{Result, ShapeError},
    node::Node,
    optimizer::{GradientDescent, Optimizer},
    port::Port,
    Float, Vector,
};

/// Affine transformation `y = W x + b`.
///
/// `W` has shape `(output_dim, input_dim)`. Gradients accumulate across `backward` calls until
/// `clear_error`, so several errors can be injected before a single `update`.
pub struct Dense<O = GradientDescent> {
    input: Port,
    output: Port,
    weights: Array2<Float>,
    bias: Vector,
    weights_grad: Array2<Float>,
    bias_grad: Vector,
    optimizer: O,
}

impl<O: Optimizer> Dense<O> {
    /// Weights and bias are drawn from `Uniform(-1, 1)`.
    pub fn new(input: &Port, output_dim: usize, optimizer: O) -> Self {
        let weights = Array::random((output_dim, input.dim()), Uniform::new(-1.0, 1.0));
        let bias = Array::random(output_dim, Uniform::new(-1.0, 1.0));
        Self::build(input, weights, bias, optimizer)
    }

    pub fn with_weights(
        input: &Port,
        weights: Array2<Float>,
        bias: Vector,
        optimizer: O,
    ) -> std::result::Result<Self, ShapeError> {
        ShapeError::check("dense weight columns", input.dim(), weights.ncols())?;
        ShapeError::check("dense bias", weights.nrows(), bias.len())?;
        Ok(Self::build(input, weights, bias, optimizer))
    }

    fn build(input: &Port, weights: Array2<Float>, bias: Vector, optimizer: O) -> Self {
        debug!("dense node {} -> {}", weights.ncols(), weights.nrows());
        Self {
            input: input.clone(),
            output: Port::new(weights.nrows()),
            weights_grad: Array2::zeros(weights.raw_dim()),
            bias_grad: Vector::zeros(bias.len()),
            weights,
            bias,
            optimizer,
        }
    }

    pub fn weights(&self) -> &Array2<Float> {
        &self.weights
    }

    pub fn bias(&self) -> &Vector {
        &self.bias
    }
}

impl<O: Optimizer> Node for Dense<O> {
    fn input_dim(&self) -> usize {
        self.weights.ncols()
    }

    fn input(&self) -> &Port {
        &self.input
    }

    fn output(&self) -> &Port {
        &self.output
    }

    fn forward(&mut self) -> Result<()> {
        let y = {
            let x = self.input.value();
            ShapeError::check("dense forward", self.weights.ncols(), x.len())?;
            self.weights.dot(&*x) + &self.bias
        };
        self.output.set_value(y.view())?;
        Ok(())
    }

    fn backward(&mut self) -> Result<()> {
        let input_error = {
            let delta = self.output.error();
            let x = self.input.value();
            ShapeError::check("dense backward", self.weights.nrows(), delta.len())?;

            let outer = delta
                .view()
                .insert_axis(Axis(1))
                .dot(&x.view().insert_axis(Axis(0)));
            self.weights_grad += &outer;
            self.bias_grad += &*delta;

            self.weights.t().dot(&*delta)
        };
        self.input.set_error(input_error.view())?;
        Ok(())
    }

    fn update(&mut self) {
        self.optimizer.update(&mut self.weights, &self.weights_grad);
        self.optimizer.update(&mut self.bias, &self.bias_grad);
    }

    fn clear_error(&mut self) {
        self.weights_grad.fill(0.0);
        self.bias_grad.fill(0.0);
        self.output.clear_error();
    }
}

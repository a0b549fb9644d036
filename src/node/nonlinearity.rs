use ndarray::Zip;

use crate::{error::Result, node::Node, port::Port, Float, Vector};

/// Element-wise function applied by a [`Nonlinearity`] node.
pub trait Activation {
    fn compute(&self, x: Float) -> Float;

    fn derivative(&self, x: Float) -> Float;
}

pub struct Identity;

impl Activation for Identity {
    fn compute(&self, x: Float) -> Float {
        x
    }

    fn derivative(&self, _x: Float) -> Float {
        1.0
    }
}

pub struct Sigmoid;

impl Sigmoid {
    fn compute_one(x: Float) -> Float {
        1.0 / (1.0 + (-x).exp())
    }
}

impl Activation for Sigmoid {
    fn compute(&self, x: Float) -> Float {
        Sigmoid::compute_one(x)
    }

    fn derivative(&self, x: Float) -> Float {
        let s = Sigmoid::compute_one(x);
        s * (1.0 - s)
    }
}

pub struct Relu;

impl Activation for Relu {
    fn compute(&self, x: Float) -> Float {
        if x > 0.0 {
            x
        } else {
            0.0
        }
    }

    fn derivative(&self, x: Float) -> Float {
        if x > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}

pub struct Tanh;

impl Activation for Tanh {
    fn compute(&self, x: Float) -> Float {
        x.tanh()
    }

    fn derivative(&self, x: Float) -> Float {
        1.0 - x.tanh().powi(2)
    }
}

/// Applies an [`Activation`] to every element. Has no parameters, so `update` is a no-op and
/// the output has the input's dimension.
pub struct Nonlinearity<A> {
    input: Port,
    output: Port,
    activation: A,
}

impl<A: Activation> Nonlinearity<A> {
    pub fn new(input: &Port, activation: A) -> Self {
        Self {
            input: input.clone(),
            output: Port::new(input.dim()),
            activation,
        }
    }
}

impl<A: Activation> Node for Nonlinearity<A> {
    fn input_dim(&self) -> usize {
        self.input.dim()
    }

    fn input(&self) -> &Port {
        &self.input
    }

    fn output(&self) -> &Port {
        &self.output
    }

    fn forward(&mut self) -> Result<()> {
        let activation = &self.activation;
        let y = self.input.value().mapv(|x| activation.compute(x));
        self.output.set_value(y.view())?;
        Ok(())
    }

    fn backward(&mut self) -> Result<()> {
        let mut buffer = Vector::zeros(self.input.dim());
        Zip::from(&mut buffer)
            .and(&*self.output.error())
            .and(&*self.input.value())
            .for_each(|buffer, &error, &x| *buffer = error * self.activation.derivative(x));
        self.input.set_error(buffer.view())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_rel_eq_vec;

    use super::*;

    use approx::assert_relative_eq;
    use ndarray::arr1;

    fn map<A: Activation>(activation: A, xs: &[Float]) -> Vector {
        arr1(xs).mapv(|x| activation.compute(x))
    }

    fn map_derivative<A: Activation>(activation: A, xs: &[Float]) -> Vector {
        arr1(xs).mapv(|x| activation.derivative(x))
    }

    #[test]
    fn sigmoid_compute() {
        assert_rel_eq_vec!(
            map(Sigmoid, &[-2.0, -1.0, 0.0, 1.0, 2.0]),
            arr1(&[
                0.1192029220221175,
                0.2689414213699951,
                0.5000000000000000,
                0.7310585786300049,
                0.8807970779778823,
            ])
        );
    }

    #[test]
    fn sigmoid_derivative() {
        assert_rel_eq_vec!(
            map_derivative(Sigmoid, &[-2.0, -1.0, 0.0, 1.0, 2.0]),
            arr1(&[
                0.1049935854035065,
                0.1966119332414819,
                0.2500000000000000,
                0.1966119332414819,
                0.1049935854035066,
            ])
        );
    }

    #[test]
    fn relu_compute_and_derivative() {
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        assert_rel_eq_vec!(map(Relu, &xs), arr1(&[0.0, 0.0, 0.0, 1.0, 2.0]));
        assert_rel_eq_vec!(map_derivative(Relu, &xs), arr1(&[0.0, 0.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn tanh_derivative_at_zero() {
        assert_relative_eq!(0.0, Tanh.compute(0.0));
        assert_relative_eq!(1.0, Tanh.derivative(0.0));
        assert_relative_eq!(0.41997434161402614, Tanh.derivative(1.0), max_relative = 1e-12);
    }

    #[test]
    fn sigmoid_node_forward_backward() {
        let input = Port::new(3);
        let mut node = Nonlinearity::new(&input, Sigmoid);
        assert_eq!(3, node.input_dim());

        input.set_value(arr1(&[-1.0, 0.0, 1.0]).view()).unwrap();
        node.forward().unwrap();
        assert_rel_eq_vec!(
            arr1(&[0.2689414213699951, 0.5, 0.7310585786300049]),
            node.output().value().clone()
        );
        assert_rel_eq_vec!(arr1(&[0.0, 0.0, 0.0]), node.output().error().clone());

        node.output().set_error(arr1(&[1.0, 2.0, -1.0]).view()).unwrap();
        node.backward().unwrap();
        assert_rel_eq_vec!(
            arr1(&[0.1966119332414819, 0.5, -0.1966119332414819]),
            input.error().clone()
        );
    }

    #[test]
    fn clear_error_zeroes_output_error() {
        let input = Port::new(2);
        let mut node = Nonlinearity::new(&input, Identity);
        node.output().set_error(arr1(&[1.0, 1.0]).view()).unwrap();
        node.clear_error();
        assert_rel_eq_vec!(arr1(&[0.0, 0.0]), node.output().error().clone());
    }
}

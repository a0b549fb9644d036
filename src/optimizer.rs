mod gradient_descent;

use ndarray::{Array, Dimension};

use crate::Float;

pub use gradient_descent::GradientDescent;

/// Trait to abstract how a parameter moves along its gradient.
pub trait Optimizer {
    fn update<D>(&self, parameter: &mut Array<Float, D>, gradient: &Array<Float, D>)
    where
        D: Dimension;
}

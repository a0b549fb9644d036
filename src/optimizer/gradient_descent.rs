use ndarray::{Array, Dimension, Zip};

use crate::{optimizer::Optimizer, Float};

/// Plain gradient descent with a constant learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    learning_rate: Float,
}

impl GradientDescent {
    pub fn new(learning_rate: Float) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> Float {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    fn update<D>(&self, parameter: &mut Array<Float, D>, gradient: &Array<Float, D>)
    where
        D: Dimension,
    {
        Zip::from(parameter)
            .and(gradient)
            .for_each(|p, &g| *p -= self.learning_rate * g);
    }
}

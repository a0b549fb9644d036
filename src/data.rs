use std::vec;

use ndarray::{Array2, ArrayView1, Axis};
use ndarray_rand::rand::{prelude::ThreadRng, seq::index::sample, thread_rng};

use crate::{error::ShapeError, Float};

/// Sampler produces the order in which samples of a dataset are visited.
pub enum Sampler {
    Sequential(usize),
    Random(usize, ThreadRng),
}

impl Sampler {
    pub fn sample(&mut self) -> Vec<usize> {
        match self {
            Self::Sequential(size) => (0..*size).collect(),
            Self::Random(size, rng) => sample(rng, *size, *size).into_vec(),
        }
    }
}

/// Paired inputs and targets, one sample per row.
pub struct Dataset {
    sampler: Sampler,
    inputs: Array2<Float>,
    targets: Array2<Float>,
}

impl Dataset {
    pub fn new(inputs: Array2<Float>, targets: Array2<Float>) -> Result<Self, ShapeError> {
        ShapeError::check("dataset rows", inputs.nrows(), targets.nrows())?;
        Ok(Self {
            sampler: Sampler::Sequential(inputs.nrows()),
            inputs,
            targets,
        })
    }

    /// Build a dataset from per-sample rows. Every row must have the width of the first.
    pub fn from_rows(inputs: &[Vec<Float>], targets: &[Vec<Float>]) -> Result<Self, ShapeError> {
        Self::new(stack_rows(inputs)?, stack_rows(targets)?)
    }

    pub fn len(&self) -> usize {
        self.inputs.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn input_dim(&self) -> usize {
        self.inputs.ncols()
    }

    pub fn target_dim(&self) -> usize {
        self.targets.ncols()
    }

    /// If enabled, visit samples in a new random order each epoch.
    pub fn shuffle(mut self) -> Self {
        self.sampler = Sampler::Random(self.len(), thread_rng());
        self
    }

    /// Iterate over `(input, target)` pairs. This is intended to be called each epoch.
    pub fn samples(&mut self) -> Samples<'_> {
        Samples {
            indices: self.sampler.sample().into_iter(),
            inputs: &self.inputs,
            targets: &self.targets,
        }
    }
}

fn stack_rows(rows: &[Vec<Float>]) -> Result<Array2<Float>, ShapeError> {
    let width = rows.first().map_or(0, Vec::len);
    let mut flat = Vec::with_capacity(rows.len() * width);
    for row in rows {
        ShapeError::check("dataset row width", width, row.len())?;
        flat.extend_from_slice(row);
    }
    let len = flat.len();
    Array2::from_shape_vec((rows.len(), width), flat).map_err(|_| ShapeError {
        at: "dataset rows",
        expected: rows.len() * width,
        got: len,
    })
}

pub struct Samples<'a> {
    indices: vec::IntoIter<usize>,
    inputs: &'a Array2<Float>,
    targets: &'a Array2<Float>,
}

impl<'a> Iterator for Samples<'a> {
    type Item = (ArrayView1<'a, Float>, ArrayView1<'a, Float>);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some((
            self.inputs.index_axis(Axis(0), index),
            self.targets.index_axis(Axis(0), index),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

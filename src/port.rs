use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

use ndarray::ArrayView1;

use crate::{error::ShapeError, Float, Vector};

struct Signal {
    value: Vector,
    error: Vector,
}

/// A value buffer paired with the error (gradient) flowing back into it.
///
/// `Port` is a handle: cloning it yields another view onto the same buffers, which is how a
/// node reads the port written by its predecessor. Both buffers have the dimension given at
/// construction, and every write goes through a checked setter so it stays that way.
#[derive(Clone)]
pub struct Port {
    signal: Rc<RefCell<Signal>>,
    dim: usize,
}

impl Port {
    /// Create a port whose value and error are zero vectors of length `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            signal: Rc::new(RefCell::new(Signal {
                value: Vector::zeros(dim),
                error: Vector::zeros(dim),
            })),
            dim,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn value(&self) -> Ref<Vector> {
        Ref::map(self.signal.borrow(), |s| &s.value)
    }

    pub fn error(&self) -> Ref<Vector> {
        Ref::map(self.signal.borrow(), |s| &s.error)
    }

    /// Overwrite the value. The buffer is left untouched on a dimension mismatch.
    pub fn set_value(&self, value: ArrayView1<Float>) -> Result<(), ShapeError> {
        ShapeError::check("port value", self.dim, value.len())?;
        self.signal.borrow_mut().value.assign(&value);
        Ok(())
    }

    /// Overwrite the error. The buffer is left untouched on a dimension mismatch.
    pub fn set_error(&self, error: ArrayView1<Float>) -> Result<(), ShapeError> {
        ShapeError::check("port error", self.dim, error.len())?;
        self.signal.borrow_mut().error.assign(&error);
        Ok(())
    }

    pub fn clear_error(&self) {
        self.signal.borrow_mut().error.fill(0.0);
    }

    /// Whether both handles point at the same buffers.
    pub fn shares_buffer(&self, other: &Port) -> bool {
        Rc::ptr_eq(&self.signal, &other.signal)
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signal = self.signal.borrow();
        f.debug_struct("Port")
            .field("value", &signal.value)
            .field("error", &signal.error)
            .finish()
    }
}

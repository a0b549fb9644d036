//! A small engine for training feedforward models one sample at a time.
//!
//! A [`Network`] is a linear pipeline of [`Node`]s. Adjacent nodes talk through [`Port`]s, each
//! holding a value that flows forward and an error that flows backward:
//!
//! ```
//! use ndarray::arr1;
//! use portnet::{
//!     network::Network,
//!     node::{Dense, Nonlinearity, Tanh},
//!     optimizer::GradientDescent,
//! };
//!
//! let mut network = Network::new(2);
//! network.add_node_with(|port| Dense::new(port, 4, GradientDescent::new(0.1))).unwrap();
//! network.add_node_with(|port| Nonlinearity::new(port, Tanh)).unwrap();
//! network.add_node_with(|port| Dense::new(port, 1, GradientDescent::new(0.1))).unwrap();
//!
//! let loss = network
//!     .train_sample(arr1(&[0.5, -0.5]).view(), arr1(&[1.0]).view())
//!     .unwrap();
//! assert!(loss >= 0.0);
//! ```

use ndarray::Array1;

pub mod config;
pub mod data;
pub mod error;
pub mod loss;
pub mod network;
pub mod node;
pub mod optimizer;
pub mod port;
pub mod trainer;

pub use error::{Error, Result, ShapeError};
pub use network::Network;
pub use node::Node;
pub use port::Port;

pub type Float = f64;

pub type Vector = Array1<Float>;

/// Compare two 1-D arrays element by element with `approx::assert_relative_eq!`.
///
/// Needs `approx` in scope, so it is only meant for this crate's own tests.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_rel_eq_vec {
    ($actual:expr, $expected:expr) => {
        let actual = $actual;
        let expected = $expected;
        assert_eq!(actual.shape(), expected.shape());
        ndarray::Zip::from(&actual)
            .and(&expected)
            .for_each(|v, w| {
                ::approx::assert_relative_eq!(v, w, epsilon = 1e-12, max_relative = 1e-10);
            });
    };
}

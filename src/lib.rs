//! A small feed-forward neural network engine.
//!
//! `ffnet` is a from-scratch implementation of a sigmoid multi-layer
//! perceptron: per-neuron weight vectors (bias first), a staged topology
//! builder, a deterministic forward pass, and backward error-gradient
//! computation for supervised training.
//!
//! # Design goals
//!
//! - Explicit lifecycle: reserve layer slots, append hidden layers, finalize
//!   into a runnable [`Network`]. Running before finalization does not
//!   compile, and finalizing twice does not either.
//! - Deterministic: weight initialization draws from a caller-supplied
//!   seeded RNG; a fixed seed and call sequence reproduces bit-identical
//!   outputs and gradients.
//! - Gradients and updates are separate concerns: [`Network::adjust`]
//!   computes per-neuron deltas and the summed error, [`Sgd`] applies them
//!   to the weights under an explicit learning rate.
//!
//! # Panics vs `Result`
//!
//! Construction and the pattern-shaped runtime boundary are validated and
//! return [`Result`]. Internal per-neuron arithmetic relies on invariants
//! the builder established and guards them with `debug_assert!` only.
//!
//! # Quick start
//!
//! ```rust
//! use ffnet::{NetBuilder, Pattern, Sgd};
//!
//! # fn main() -> ffnet::Result<()> {
//! let mut builder = NetBuilder::new(2, 1, 1)?;
//! builder.add_hidden(2)?;
//! let mut net = builder.finalize_with_seed(1);
//! let sgd = Sgd::new(0.5)?;
//!
//! let input = Pattern::from_slice(&[1.0, 0.0]);
//! let target = Pattern::from_slice(&[1.0]);
//! let mut output = Pattern::with_capacity(1);
//!
//! net.set_inputs(&input)?;
//! net.process();
//! net.get_outputs(&mut output);
//! let error = net.adjust(&output, &target)?;
//! sgd.step(&mut net);
//! assert!(error >= 0.0);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod error;
pub mod layer;
pub mod network;
pub mod neuron;
pub mod optim;
pub mod pattern;

#[cfg(feature = "trace")]
pub mod trace;

pub use builder::NetBuilder;
pub use error::{Error, Result};
pub use layer::Layer;
pub use network::Network;
pub use neuron::Neuron;
pub use optim::Sgd;
pub use pattern::Pattern;

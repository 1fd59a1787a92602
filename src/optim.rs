//! Weight updates.
//!
//! [`Network::adjust`](crate::Network::adjust) computes per-neuron error
//! gradients but deliberately does not touch the weights; the update step is
//! a separate, explicit policy owned by the caller.
//!
//! Design notes:
//! - The only configuration is the learning rate, validated at construction.
//! - The bias weight is updated with the same delta as the regular weights,
//!   with an implicit input of 1.0.
//! - Deltas carry a `(target - output)` sign, so adding `lr * delta * input`
//!   descends the squared error.

use crate::{Error, Network, Result};

/// Plain stochastic gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    /// Create an update policy with the given learning rate.
    ///
    /// The rate must be finite and > 0.
    pub fn new(learning_rate: f64) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite and > 0, got {learning_rate}"
            )));
        }
        Ok(Self { learning_rate })
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Apply one gradient step to every non-input weight.
    ///
    /// Uses the deltas and activations left by the most recent
    /// `process`/`adjust` cycle:
    /// `w[i + 1] += lr * delta * input_i` and `w[0] += lr * delta`.
    pub fn step(&self, net: &mut Network) {
        for l in 1..=net.out_layer_index() {
            let (prev, cur) = net.layer_pair_mut(l);
            for neuron in cur.neurons_mut() {
                let scaled = self.learning_rate * neuron.delta();
                let weights = neuron.weights_mut();
                weights[0] += scaled;
                for (w, input) in weights[1..].iter_mut().zip(prev.neurons()) {
                    *w += scaled * input.output();
                }
            }
        }
    }
}

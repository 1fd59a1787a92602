//! The scalar unit of the network.
//!
//! A neuron owns its incoming weight vector and two pieces of mutable state:
//! the activation produced by the last forward pass and the error gradient
//! (`delta`) produced by the last backward pass.
//!
//! Weight layout: `weights[0]` is the bias (implicit input of 1.0) and
//! `weights[i + 1]` applies to neuron `i` of the preceding layer. Input-layer
//! neurons have no incoming weights at all.

use rand::Rng;

use crate::activation::sigmoid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neuron {
    output: f64,
    delta: f64,
    weights: Vec<f64>,
}

impl Neuron {
    /// Activation from the most recent forward pass.
    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Partial derivative of the total error with respect to this neuron's
    /// pre-activation sum. Meaningless before a backward pass has run.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Incoming weights, bias first. Empty for input-layer neurons.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable view of the incoming weights, bias first.
    #[inline]
    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    #[inline]
    pub(crate) fn set_output(&mut self, output: f64) {
        self.output = output;
    }

    #[inline]
    pub(crate) fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }

    /// Allocate `input_count + 1` weights (bias included), each drawn
    /// independently from uniform [-0.5, 0.5).
    pub(crate) fn init_weights<R: Rng + ?Sized>(&mut self, input_count: usize, rng: &mut R) {
        self.weights = (0..input_count + 1)
            .map(|_| rng.gen::<f64>() - 0.5)
            .collect();
        self.output = 0.0;
        self.delta = 0.0;
    }

    /// Compute this neuron's activation from the preceding layer's outputs.
    #[inline]
    pub(crate) fn feed(&mut self, inputs: &[Neuron]) {
        debug_assert_eq!(self.weights.len(), inputs.len() + 1);

        let mut sum = self.weights[0];
        for (w, input) in self.weights[1..].iter().zip(inputs) {
            sum = w.mul_add(input.output, sum);
        }
        self.output = sigmoid(sum);
    }
}

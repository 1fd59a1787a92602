//! The finalized network: forward inference and backward error propagation.
//!
//! A `Network` only exists after [`NetBuilder`](crate::NetBuilder)
//! finalization, so every runtime operation can assume a fixed topology with
//! initialized weights. The layer sequence keeps its full slot array; slots
//! past the output layer are empty when fewer hidden layers were appended
//! than reserved.
//!
//! One training cycle against a single pattern:
//! - `set_inputs` copies the sample into the input layer,
//! - `process` runs the forward pass in layer order,
//! - `get_outputs` captures the output layer into a caller buffer,
//! - `adjust` computes per-neuron error gradients and the summed error.
//!
//! `adjust` computes gradients only; applying them to the weights is the
//! job of [`Sgd`](crate::Sgd).

use crate::activation::sigmoid_grad_from_output;
use crate::{Error, Layer, Pattern, Result};

#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    out_layer: usize,
    last_hidden: usize,
    error: f64,
}

impl Network {
    pub(crate) fn from_parts(layers: Vec<Layer>, out_layer: usize, last_hidden: usize) -> Self {
        debug_assert!(out_layer >= 1 && out_layer < layers.len());
        Self {
            layers,
            out_layer,
            last_hidden,
            error: 0.0,
        }
    }

    /// Number of input-layer neurons.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of output-layer neurons.
    #[inline]
    pub fn output_dim(&self) -> usize {
        self.layers[self.out_layer].len()
    }

    /// Slot index of the output layer.
    #[inline]
    pub fn out_layer_index(&self) -> usize {
        self.out_layer
    }

    /// Number of hidden layers in the topology.
    #[inline]
    pub fn hidden_count(&self) -> usize {
        self.last_hidden
    }

    /// The full slot array, including any empty trailing slots.
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Summed error from the most recent [`adjust`](Self::adjust) call.
    #[inline]
    pub fn total_error(&self) -> f64 {
        self.error
    }

    /// Copy a sample into the input layer's neuron outputs, in index order.
    ///
    /// The pattern length must equal the input layer size; anything else is
    /// rejected with `InvalidShape`.
    pub fn set_inputs(&mut self, input: &Pattern) -> Result<()> {
        let input_dim = self.layers[0].len();
        if input.len() != input_dim {
            return Err(Error::InvalidShape(format!(
                "input pattern len {} does not match input layer size {input_dim}",
                input.len()
            )));
        }

        for (neuron, &value) in self.layers[0]
            .neurons_mut()
            .iter_mut()
            .zip(input.as_slice())
        {
            neuron.set_output(value);
        }
        Ok(())
    }

    /// Forward pass: recompute every activation from the first hidden layer
    /// through the output layer, in slot order.
    pub fn process(&mut self) {
        for l in 1..=self.out_layer {
            let (prev, rest) = self.layers.split_at_mut(l);
            rest[0].forward_from(&prev[l - 1]);
        }
    }

    /// Copy output-layer activations into `out`, in index order.
    ///
    /// Copies `min(out.capacity(), output_dim)` values and sets the pattern's
    /// active length to that count. A pattern smaller than the output layer is
    /// truncated silently; that is policy, not an error.
    pub fn get_outputs(&self, out: &mut Pattern) {
        let out_layer = &self.layers[self.out_layer];
        let count = out.capacity().min(out_layer.len());
        out.fill_from(out_layer.neurons().iter().map(|n| n.output()), count);
    }

    /// Backward pass: compute per-neuron error gradients for the output and
    /// hidden layers and return the summed halved squared error.
    ///
    /// `output` is the captured output pattern from the forward pass and
    /// `target` the desired pattern; both must match the output layer size.
    ///
    /// For output neuron `n` with captured output `y`:
    /// `delta = (target[n] - y) * y * (1 - y)` and the error gains
    /// `0.5 * (target[n] - y)^2`. Each earlier layer's deltas are then the
    /// weight-propagated sums of its successor's deltas (bias weights carry
    /// no contribution backward), scaled by the local sigmoid derivative.
    pub fn adjust(&mut self, output: &Pattern, target: &Pattern) -> Result<f64> {
        let output_dim = self.layers[self.out_layer].len();
        if output.len() != target.len() {
            return Err(Error::InvalidShape(format!(
                "output pattern len {} does not match target pattern len {}",
                output.len(),
                target.len()
            )));
        }
        if output.len() != output_dim {
            return Err(Error::InvalidShape(format!(
                "pattern len {} does not match output layer size {output_dim}",
                output.len()
            )));
        }

        let mut total = 0.0;
        for (n, neuron) in self.layers[self.out_layer]
            .neurons_mut()
            .iter_mut()
            .enumerate()
        {
            let err = target[n] - output[n];
            neuron.set_delta(err * sigmoid_grad_from_output(output[n]));
            total += 0.5 * err * err;
        }
        self.error = total;

        // Propagate deltas backward, layer pair by layer pair. The loop stops
        // before the input layer, which has no weights to receive gradients.
        for l in (2..=self.out_layer).rev() {
            let (prev, rest) = self.layers.split_at_mut(l);
            let prev = &mut prev[l - 1];
            let cur = &rest[0];

            for (j, neuron) in prev.neurons_mut().iter_mut().enumerate() {
                let mut sum = 0.0;
                for cn in cur.neurons() {
                    sum = cn.delta().mul_add(cn.weights()[j + 1], sum);
                }
                neuron.set_delta(sum * sigmoid_grad_from_output(neuron.output()));
            }
        }

        Ok(self.error)
    }

    /// Borrow a layer and its predecessor, the predecessor immutably.
    #[inline]
    pub(crate) fn layer_pair_mut(&mut self, l: usize) -> (&Layer, &mut Layer) {
        let (prev, rest) = self.layers.split_at_mut(l);
        (&prev[l - 1], &mut rest[0])
    }
}

#[cfg(test)]
mod tests {
    use crate::activation::sigmoid;
    use crate::NetBuilder;

    use super::*;

    fn xor_sized_net(seed: u64) -> Network {
        let mut builder = NetBuilder::new(2, 1, 1).unwrap();
        builder.add_hidden(2).unwrap();
        builder.finalize_with_seed(seed)
    }

    /// Forward-only error against `target`, leaving deltas untouched.
    fn recomputed_error(net: &mut Network, target: &[f64]) -> f64 {
        net.process();
        net.layers()[net.out_layer_index()]
            .neurons()
            .iter()
            .zip(target)
            .map(|(n, &t)| {
                let err = t - n.output();
                0.5 * err * err
            })
            .sum()
    }

    #[test]
    fn set_inputs_rejects_length_mismatch() {
        let mut net = xor_sized_net(0);
        let short = Pattern::from_slice(&[1.0]);
        let long = Pattern::from_slice(&[1.0, 0.0, 1.0]);
        assert!(matches!(
            net.set_inputs(&short),
            Err(Error::InvalidShape(_))
        ));
        assert!(matches!(net.set_inputs(&long), Err(Error::InvalidShape(_))));
        assert!(net.set_inputs(&Pattern::from_slice(&[1.0, 0.0])).is_ok());
    }

    #[test]
    fn process_outputs_stay_in_open_unit_interval() {
        for seed in 0..4 {
            let mut net = xor_sized_net(seed);
            net.set_inputs(&Pattern::from_slice(&[1.0, 0.0])).unwrap();
            net.process();

            let mut out = Pattern::with_capacity(1);
            net.get_outputs(&mut out);
            assert_eq!(out.len(), 1);
            assert!(out[0] > 0.0 && out[0] < 1.0, "output {} not in (0,1)", out[0]);
        }
    }

    #[test]
    fn get_outputs_truncates_to_pattern_capacity() {
        let builder = NetBuilder::new(2, 0, 3).unwrap();
        let mut net = builder.finalize_with_seed(0);
        net.set_inputs(&Pattern::from_slice(&[0.5, 0.5])).unwrap();
        net.process();

        let mut small = Pattern::with_capacity(2);
        net.get_outputs(&mut small);
        assert_eq!(small.len(), 2);

        let mut big = Pattern::with_capacity(5);
        net.get_outputs(&mut big);
        assert_eq!(big.len(), 3);
    }

    #[test]
    fn adjust_rejects_mismatched_patterns() {
        let mut net = xor_sized_net(0);
        net.set_inputs(&Pattern::from_slice(&[1.0, 1.0])).unwrap();
        net.process();

        let output = Pattern::from_slice(&[0.5]);
        let two = Pattern::from_slice(&[0.5, 0.5]);
        assert!(matches!(
            net.adjust(&output, &two),
            Err(Error::InvalidShape(_))
        ));
        assert!(matches!(
            net.adjust(&two, &two),
            Err(Error::InvalidShape(_))
        ));
    }

    #[test]
    fn adjust_error_is_non_negative_and_zero_only_on_exact_match() {
        let mut net = xor_sized_net(3);
        net.set_inputs(&Pattern::from_slice(&[0.0, 1.0])).unwrap();
        net.process();

        let mut output = Pattern::with_capacity(1);
        net.get_outputs(&mut output);

        // Target equal to the output: error is exactly zero.
        let err = net.adjust(&output, &output.clone()).unwrap();
        assert_eq!(err, 0.0);

        // Any other target: strictly positive.
        let target = Pattern::from_slice(&[output[0] + 0.25]);
        let err = net.adjust(&output, &target).unwrap();
        assert!(err > 0.0);
        assert_eq!(err, net.total_error());
    }

    #[test]
    fn repeated_cycles_are_deterministic() {
        let run = || {
            let mut net = xor_sized_net(11);
            let inputs = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
            let targets = [[0.0], [1.0], [1.0], [0.0]];
            let mut trace = Vec::new();
            for (x, t) in inputs.iter().zip(&targets) {
                net.set_inputs(&Pattern::from_slice(x)).unwrap();
                net.process();
                let mut out = Pattern::with_capacity(1);
                net.get_outputs(&mut out);
                let err = net.adjust(&out, &Pattern::from_slice(t)).unwrap();
                trace.push((out[0].to_bits(), err.to_bits()));
                for layer in net.layers() {
                    for n in layer.neurons() {
                        trace.push((n.output().to_bits(), n.delta().to_bits()));
                    }
                }
            }
            trace
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn gradients_match_hand_derived_values() {
        let mut net = xor_sized_net(0);

        // Fix the weights so the expected deltas can be derived by hand.
        let hidden = net.layers[1].neurons_mut();
        hidden[0].weights_mut().copy_from_slice(&[0.1, 0.2, -0.3]);
        hidden[1].weights_mut().copy_from_slice(&[-0.2, 0.4, 0.25]);
        net.layers[2].neurons_mut()[0]
            .weights_mut()
            .copy_from_slice(&[0.3, -0.5, 0.35]);

        let input = [0.6, 0.9];
        let target = 0.25;

        net.set_inputs(&Pattern::from_slice(&input)).unwrap();
        net.process();
        let mut out = Pattern::with_capacity(1);
        net.get_outputs(&mut out);
        let err = net
            .adjust(&out, &Pattern::from_slice(&[target]))
            .unwrap();

        // Independently derived from the chain rule.
        let h0 = sigmoid(0.1 + 0.2 * 0.6 + -0.3 * 0.9);
        let h1 = sigmoid(-0.2 + 0.4 * 0.6 + 0.25 * 0.9);
        let y = sigmoid(0.3 + -0.5 * h0 + 0.35 * h1);
        let delta_out = (target - y) * y * (1.0 - y);
        let delta_h0 = delta_out * -0.5 * h0 * (1.0 - h0);
        let delta_h1 = delta_out * 0.35 * h1 * (1.0 - h1);

        assert!((out[0] - y).abs() < 1e-9);
        assert!((err - 0.5 * (target - y) * (target - y)).abs() < 1e-9);
        assert!((net.layers()[2].neuron(0).delta() - delta_out).abs() < 1e-9);
        assert!((net.layers()[1].neuron(0).delta() - delta_h0).abs() < 1e-9);
        assert!((net.layers()[1].neuron(1).delta() - delta_h1).abs() < 1e-9);
    }

    #[test]
    fn deltas_match_numeric_gradients() {
        let mut net = xor_sized_net(5);
        let input = Pattern::from_slice(&[0.3, -0.7]);
        let target = [0.2];

        net.set_inputs(&input).unwrap();
        net.process();
        let mut out = Pattern::with_capacity(1);
        net.get_outputs(&mut out);
        net.adjust(&out, &Pattern::from_slice(&target)).unwrap();

        // dE/dw for weight (l, n, i) is -delta * input_i (input 1.0 for the
        // bias), under this crate's (target - output) delta sign convention.
        let eps = 1e-6;
        for l in 1..=net.out_layer_index() {
            for n in 0..net.layers()[l].len() {
                let delta = net.layers()[l].neuron(n).delta();
                let weight_count = net.layers()[l].neuron(n).weights().len();

                for w in 0..weight_count {
                    // Refresh activations; the previous iteration's perturbed
                    // forward passes left them stale.
                    net.process();
                    let analytic = if w == 0 {
                        -delta
                    } else {
                        -delta * net.layers()[l - 1].neuron(w - 1).output()
                    };

                    let orig = net.layers()[l].neuron(n).weights()[w];
                    net.layers[l].neurons_mut()[n].weights_mut()[w] = orig + eps;
                    let plus = recomputed_error(&mut net, &target);
                    net.layers[l].neurons_mut()[n].weights_mut()[w] = orig - eps;
                    let minus = recomputed_error(&mut net, &target);
                    net.layers[l].neurons_mut()[n].weights_mut()[w] = orig;

                    let numeric = (plus - minus) / (2.0 * eps);
                    assert!(
                        (analytic - numeric).abs() < 1e-6,
                        "layer {l} neuron {n} weight {w}: analytic={analytic} numeric={numeric}"
                    );
                }
            }
        }
    }
}

//! Topology construction.
//!
//! `NetBuilder` stages the network lifecycle: reserve slots up front, append
//! hidden layers one at a time, then finalize into a runnable [`Network`].
//! Finalization consumes the builder, so a half-built network can never run a
//! forward or backward pass, and finalizing twice does not compile.
//!
//! Slot layout: index 0 is the input layer, the last index initially holds the
//! output layer, and the indices between are hidden-layer slots filled in
//! append order. If fewer hidden layers are appended than were reserved,
//! finalization moves the output layer down to sit immediately after the last
//! hidden layer and leaves the unused trailing slots empty.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Layer, Network, Result};

/// Staged constructor for a [`Network`].
///
/// Example:
///
/// ```rust
/// use ffnet::NetBuilder;
///
/// # fn main() -> ffnet::Result<()> {
/// let mut builder = NetBuilder::new(2, 1, 1)?;
/// builder.add_hidden(2)?;
/// let net = builder.finalize_with_seed(1);
/// assert_eq!(net.input_dim(), 2);
/// assert_eq!(net.output_dim(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NetBuilder {
    layers: Vec<Layer>,
    last_hidden: usize,
}

impl NetBuilder {
    /// Reserve slots for `2 + hidden_reserve` layers and create the input and
    /// output layers.
    ///
    /// `num_inputs` and `num_outputs` must be positive; `hidden_reserve` may
    /// be zero for a single-layer (input -> output) network.
    pub fn new(num_inputs: usize, hidden_reserve: usize, num_outputs: usize) -> Result<Self> {
        if num_inputs == 0 {
            return Err(Error::InvalidConfig("num_inputs must be > 0".to_owned()));
        }
        if num_outputs == 0 {
            return Err(Error::InvalidConfig("num_outputs must be > 0".to_owned()));
        }

        let max_layers = 2 + hidden_reserve;
        let mut layers = vec![Layer::default(); max_layers];
        layers[0] = Layer::with_count(num_inputs);
        layers[max_layers - 1] = Layer::with_count(num_outputs);

        Ok(Self {
            layers,
            last_hidden: 0,
        })
    }

    /// Append the next hidden layer with `count` neurons.
    ///
    /// Fails with [`Error::TooManyHiddenLayers`] once every reserved slot is
    /// used; a failed append leaves the builder untouched, so construction can
    /// continue with the layers appended so far.
    pub fn add_hidden(&mut self, count: usize) -> Result<&mut Self> {
        if count == 0 {
            return Err(Error::InvalidConfig(
                "hidden layer count must be > 0".to_owned(),
            ));
        }

        let next = self.last_hidden + 1;
        if next >= self.layers.len() - 1 {
            return Err(Error::TooManyHiddenLayers);
        }

        self.layers[next] = Layer::with_count(count);
        self.last_hidden = next;
        Ok(self)
    }

    /// Finalize using a deterministic seed.
    pub fn finalize_with_seed(self, seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        self.finalize_with_rng(&mut rng)
    }

    /// Fix the topology and initialize every non-input neuron's weights from
    /// `rng`, each weight drawn independently from uniform [-0.5, 0.5).
    ///
    /// If the caller reserved more hidden slots than it appended, the output
    /// layer's storage is moved (not copied) to the slot after the last
    /// hidden layer; the vacated trailing slot becomes an empty layer.
    pub fn finalize_with_rng<R: Rng + ?Sized>(mut self, rng: &mut R) -> Network {
        let last_slot = self.layers.len() - 1;
        let mut out_layer = last_slot;
        if self.last_hidden + 1 < last_slot {
            out_layer = self.last_hidden + 1;
            // The destination slot is an unused (empty) layer, so the swap is
            // a pure ownership transfer of the neuron storage.
            self.layers.swap(out_layer, last_slot);
        }

        for l in 1..=out_layer {
            let input_count = self.layers[l - 1].len();
            for neuron in self.layers[l].neurons_mut() {
                neuron.init_weights(input_count, rng);
            }
        }

        Network::from_parts(self.layers, out_layer, self.last_hidden)
    }
}

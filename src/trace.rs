//! Per-step diagnostic traces (feature: `trace`).
//!
//! A `TraceWriter` snapshots the active topology after each presented
//! pattern — outputs, deltas, weights, and the current error — as one JSON
//! object per line, for offline visualization of a training run.
//!
//! Design notes:
//! - Records are written through a versioned struct rather than the internal
//!   `Network` types, so the stream format is stable even if the internal
//!   representation changes.
//! - This is a diagnostic stream, not a model persistence format; there is
//!   no reader that reconstructs a network from it.

use std::io::{self, Write};

use serde::Serialize;

use crate::Network;

pub const TRACE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    pub format_version: u32,
    /// Caller-supplied step counter (typically epoch * patterns + index).
    pub step: u64,
    pub error: f64,
    /// One entry per populated slot, input layer first.
    pub layers: Vec<LayerRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerRecord {
    pub outputs: Vec<f64>,
    pub deltas: Vec<f64>,
    /// Per-neuron weight vectors, bias first. Empty for the input layer.
    pub weights: Vec<Vec<f64>>,
}

impl TraceRecord {
    /// Capture the network's active layers (input through output).
    pub fn snapshot(step: u64, net: &Network) -> Self {
        let layers = net.layers()[..=net.out_layer_index()]
            .iter()
            .map(|layer| LayerRecord {
                outputs: layer.neurons().iter().map(|n| n.output()).collect(),
                deltas: layer.neurons().iter().map(|n| n.delta()).collect(),
                weights: layer
                    .neurons()
                    .iter()
                    .map(|n| n.weights().to_vec())
                    .collect(),
            })
            .collect();

        Self {
            format_version: TRACE_FORMAT_VERSION,
            step,
            error: net.total_error(),
            layers,
        }
    }
}

/// Writes one JSON line per recorded step to an arbitrary sink.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    sink: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Snapshot `net` and append it as one JSON line.
    pub fn record(&mut self, step: u64, net: &Network) -> io::Result<()> {
        let record = TraceRecord::snapshot(step, net);
        serde_json::to_writer(&mut self.sink, &record).map_err(io::Error::from)?;
        self.sink.write_all(b"\n")
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

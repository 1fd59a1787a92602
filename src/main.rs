//! XOR training driver.
//!
//! Usage: `ffnet [epochs] [trace-path]`
//!
//! Trains a 2 -> 2 -> 1 network on the four XOR pairs with per-epoch
//! shuffled presentation order, stopping early once the per-epoch error
//! drops under a threshold. With the `trace` feature and a path argument,
//! every presented pattern appends one JSON trace line.

use std::env;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use ffnet::{NetBuilder, Pattern, Sgd};

#[cfg(feature = "trace")]
use std::{fs::File, io::BufWriter};

#[cfg(feature = "trace")]
use ffnet::trace::TraceWriter;

const ERROR_THRESHOLD: f64 = 0.0004;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let epoch_count = match args.next() {
        Some(arg) => arg.parse::<usize>()?,
        None => 10_000,
    };
    let trace_path = args.next();

    let inputs: Vec<Pattern> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
        .iter()
        .map(|row| Pattern::from_slice(row))
        .collect();
    let targets: Vec<Pattern> = [[0.0], [1.0], [1.0], [0.0]]
        .iter()
        .map(|row| Pattern::from_slice(row))
        .collect();
    let mut outputs = vec![Pattern::with_capacity(1); inputs.len()];

    let mut builder = NetBuilder::new(2, 1, 1)?;
    builder.add_hidden(2)?;
    let mut net = builder.finalize_with_seed(1);
    let sgd = Sgd::new(0.5)?;

    #[cfg(feature = "trace")]
    let mut tracer = match &trace_path {
        Some(path) => Some(TraceWriter::new(BufWriter::new(File::create(path)?))),
        None => None,
    };
    #[cfg(not(feature = "trace"))]
    if trace_path.is_some() {
        eprintln!("trace path ignored: built without the `trace` feature");
    }

    let mut order: Vec<usize> = (0..inputs.len()).collect();
    let mut shuffle_rng = StdRng::seed_from_u64(2);

    let mut epoch = 0;
    let mut error = 0.0;
    while epoch < epoch_count {
        error = 0.0;
        order.shuffle(&mut shuffle_rng);

        for (step, &p) in order.iter().enumerate() {
            #[cfg(not(feature = "trace"))]
            let _ = step;

            net.set_inputs(&inputs[p])?;
            net.process();
            net.get_outputs(&mut outputs[p]);
            error += net.adjust(&outputs[p], &targets[p])?;
            sgd.step(&mut net);

            #[cfg(feature = "trace")]
            if let Some(tracer) = tracer.as_mut() {
                tracer.record((epoch * inputs.len() + step) as u64, &net)?;
            }
        }

        if epoch % 100 == 0 {
            println!("epoch={epoch:<6} error={error:.6}");
        }
        if error < ERROR_THRESHOLD {
            break;
        }
        epoch += 1;
    }
    println!();
    println!("epoch={epoch} error={error:.6}");

    // Final forward pass over each pattern, in declaration order.
    println!();
    println!("pat\tinput0\tinput1\ttarget\toutput");
    for p in 0..inputs.len() {
        net.set_inputs(&inputs[p])?;
        net.process();
        net.get_outputs(&mut outputs[p]);
        println!(
            "{p}\t{:.1}\t{:.1}\t{:.1}\t{:.6}",
            inputs[p][0], inputs[p][1], targets[p][0], outputs[p][0]
        );
    }

    Ok(())
}

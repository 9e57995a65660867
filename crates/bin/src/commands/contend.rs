//! Contention command - many threads swapping one counter atom.

use std::{sync::Arc, thread, time::Instant};

use atomtree::Atom;

use crate::cli::ContendArgs;
use crate::output::{OutputFormat, print_labelled};

/// Outcome of a contention run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub expected: i64,
    pub actual: i64,
}

impl Tally {
    /// Number of increments that did not make it into the final value
    pub fn lost(&self) -> i64 {
        self.expected - self.actual
    }
}

/// Run the contend command
pub fn run(args: &ContendArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    let tally = contend(args.threads, args.swaps)?;
    let elapsed = started.elapsed();

    match format {
        OutputFormat::Human => {
            print_labelled(&[
                ("Threads", args.threads.to_string()),
                ("Swaps", args.swaps.to_string()),
                ("Expected", tally.expected.to_string()),
                ("Actual", tally.actual.to_string()),
                ("Lost", tally.lost().to_string()),
                ("Elapsed", format!("{elapsed:?}")),
            ]);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "threads": args.threads,
                "swaps": args.swaps,
                "expected": tally.expected,
                "actual": tally.actual,
                "lost": tally.lost(),
                "elapsed_ms": elapsed.as_millis() as u64,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    if tally.lost() != 0 {
        eprintln!("lost {} updates", tally.lost());
        std::process::exit(1);
    }
    Ok(())
}

/// Increment one atom `swaps` times from each of `threads` threads
fn contend(threads: usize, swaps: usize) -> Result<Tally, Box<dyn std::error::Error>> {
    let counter = Arc::new(Atom::new(0i64));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || -> atomtree::Result<()> {
                for _ in 0..swaps {
                    counter.swap(|n| n + 1)?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| "writer thread panicked")??;
    }

    Ok(Tally {
        expected: (threads * swaps) as i64,
        actual: *counter.read(),
    })
}

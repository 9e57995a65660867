//! CLI argument definitions for the atomtree binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Persistent nested maps in an atomic cell
#[derive(Parser, Debug)]
#[command(name = "atomtree")]
#[command(about = "atomtree: persistent nested maps and an atomic state cell")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", env = "ATOMTREE_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the account and pet scenario against a process-wide atom
    Walkthrough,
    /// Hammer one atom from many threads and check that no update is lost
    Contend(ContendArgs),
    /// Print the value at a dotted path of a JSON document
    GetIn(GetInArgs),
    /// Print a JSON document with a value set at a dotted path
    AssocIn(AssocInArgs),
}

/// Arguments for the contend command
#[derive(clap::Args, Debug)]
pub struct ContendArgs {
    /// Number of writer threads
    #[arg(short, long, default_value_t = 8, env = "ATOMTREE_THREADS")]
    pub threads: usize,

    /// Swaps performed by each thread
    #[arg(short, long, default_value_t = 10_000, env = "ATOMTREE_SWAPS")]
    pub swaps: usize,
}

/// Arguments for the get-in command
#[derive(clap::Args, Debug)]
pub struct GetInArgs {
    /// Dotted path, e.g. `braden.pets.bird`
    pub path: String,

    /// JSON document to read (stdin when omitted)
    pub file: Option<PathBuf>,
}

/// Arguments for the assoc-in command
#[derive(clap::Args, Debug)]
pub struct AssocInArgs {
    /// Dotted path, e.g. `braden.pets.bird`
    pub path: String,

    /// JSON value to store. Input that is not valid JSON is stored as text.
    pub value: String,

    /// JSON document to read (stdin when omitted)
    pub file: Option<PathBuf>,
}

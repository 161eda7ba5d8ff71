//! `lanevec-probe` - Reports what lane shapes the host supports.
//!
//! **Usage:**
//! ```text
//! lanevec-probe [-v] [--bits <64|128|256|512>] features
//! lanevec-probe species [--kind <i8|i16|i32|i64|f32|f64>]
//! lanevec-probe demo
//! ```
//!
//! `--bits` fixes the preferred shape for the run; otherwise
//! `LANEVEC_PREFERRED_BITS` or CPU detection decides.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lanevec::{
    preferred_shape, set_preferred_shape, CpuFeatures, ElementKind, Shape, Species, SpeciesId,
    Vector,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Inspect lane vector support on this host.
#[derive(Parser)]
#[command(
    name = "lanevec-probe",
    about = "Report CPU lane features, the preferred shape and species lane counts"
)]
struct Args {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Preferred register width in bits for this run.
    #[arg(long, global = true)]
    bits: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detected CPU features and the resolved preferred shape.
    Features,
    /// Lane counts for every (element kind, shape) pair.
    Species {
        /// Only list this element kind.
        #[arg(long)]
        kind: Option<String>,
    },
    /// Run a short masked-arithmetic walkthrough on i32 lanes.
    Demo,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(bits) = args.bits {
        let shape = Shape::from_bits(bits).context("--bits")?;
        set_preferred_shape(shape)?;
        debug!(%shape, "preferred shape set from command line");
    }

    match args.command {
        Command::Features => features(),
        Command::Species { kind } => species(kind.as_deref()),
        Command::Demo => demo(),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn features() -> Result<()> {
    let detected = CpuFeatures::detect();
    let compiled = CpuFeatures::compiled();
    println!("Detected:  {}", detected);
    println!("Compiled:  {}", compiled);
    let present = detected.present_features();
    if present.is_empty() {
        println!("Present:   (none)");
    } else {
        println!("Present:   {}", present.join(", "));
    }
    println!("Widest:    {}", detected.widest_shape());
    println!("Preferred: {}", preferred_shape());
    Ok(())
}

fn parse_kind(name: &str) -> Result<ElementKind> {
    match ElementKind::ALL.into_iter().find(|k| k.to_string() == name) {
        Some(kind) => Ok(kind),
        None => bail!("unknown element kind `{name}` (expected i8, i16, i32, i64, f32 or f64)"),
    }
}

fn species(kind: Option<&str>) -> Result<()> {
    let filter = kind.map(parse_kind).transpose()?;
    let preferred = preferred_shape();

    println!("{:<8} {:>6} {:>6} {:>6}", "species", "bits", "lanes", "bytes");
    for id in SpeciesId::all() {
        if filter.is_some_and(|k| k != id.kind()) {
            continue;
        }
        let marker = if id.shape() == preferred { " *" } else { "" };
        println!(
            "{:<8} {:>6} {:>6} {:>6}{}",
            id.to_string(),
            id.shape().bits(),
            id.lane_count(),
            id.shape().bytes(),
            marker
        );
    }
    println!("(* preferred shape: {preferred})");
    Ok(())
}

fn demo() -> Result<()> {
    let s = Species::<i32>::new(Shape::S128);
    let v = Vector::from_lanes(s, &[1, 2, 3, 4])?;
    let even_lanes = s.mask_from_fn(|i| i % 2 == 0);

    println!("v                     = {v}");
    println!("mask                  = {even_lanes}");
    println!("v.add_masked(10, m)   = {}", v.add_masked(10, even_lanes)?);
    println!("v.shift_left(1)       = {}", v.shift_left(1));
    println!("v.equal(3)            = {}", v.equal(3)?);
    println!("v.add_lanes()         = {}", v.add_lanes());

    let wide = Species::<i32>::preferred();
    let sum = Vector::iota(wide).add_lanes();
    println!("iota({wide}).add_lanes() = {sum}");
    Ok(())
}

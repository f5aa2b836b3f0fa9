use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use nttgen::{Error, Generator, GeneratorConfig};

#[derive(Parser, Debug)]
#[command(name = "nttgen")]
#[command(about = "Calculate the number of NTT cores and generate the accelerator sources")]
#[command(version)]
struct Args {
    /// Transform length N (power of two)
    #[arg(short = 'N', default_value_t = 1024)]
    n: usize,

    /// NTT-friendly prime modulus, q = 1 mod 2N
    #[arg(short = 'q', default_value_t = 12289)]
    q: u64,

    /// Coefficient bit-width
    #[arg(long, default_value_t = 32)]
    bits: u32,

    /// Spatial parallelism B (power of two)
    #[arg(short = 'B', default_value_t = 8)]
    b: usize,

    /// Number of input memory channels, in [1, 16]
    #[arg(long = "num-ch", default_value_t = 4)]
    num_ch: usize,

    /// Directory the artifacts are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Directory holding ntt.h and ntt.cpp templates (built-in templates otherwise)
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Log every generation step
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = GeneratorConfig {
        n: args.n,
        modulus: args.q,
        bits: args.bits,
        spatial_width: args.b,
        num_channels: args.num_ch,
    };

    let mut generator = Generator::new(config);
    if let Some(dir) = &args.template_dir {
        generator = generator.with_template_dir(dir)?;
    }

    let artifacts = match generator.run_to(&args.out_dir) {
        Ok(artifacts) => artifacts,
        Err(err @ Error::InfeasibleParallelism { .. }) => {
            error!(
                intended_cores = err.intended_cores().unwrap_or_default(),
                "NUM_NTT_CORES is not feasible"
            );
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        "Number of NTT cores: {}, channels per core: {}",
        artifacts.plan.num_cores, artifacts.plan.channels_per_core
    );

    Ok(())
}

//! qcolorspace - print the color-space view of a two-qubit state.

use anyhow::Context;
use clap::Parser;
use qcolorspace::errors::VisualizeError;
use qcolorspace::{BASIS_LABELS, Canvas, GateStep, Layout, StateRenderer, VisualizeRequest};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qcolorspace")]
#[command(version)]
#[command(about = "Two-qubit quantum state color-space visualizer", long_about = None)]
struct Cli {
    /// Amplitudes of |00⟩ |01⟩ |10⟩ |11⟩ (e.g. 1 0 0 1+2i)
    #[arg(
        value_name = "AMPLITUDE",
        num_args = 4,
        required = true,
        allow_hyphen_values = true
    )]
    amplitudes: Vec<String>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1000)]
    width: i32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 1000)]
    height: i32,

    /// Blank border around the plot area, in pixels
    #[arg(long, default_value_t = 50)]
    margin: i32,

    /// Layout table (TOML) overriding glyph positions, palette and corner labels
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Single gate applied before rendering (e.g. h:1, x:0:1, cnot)
    #[arg(short, long, value_name = "NAME[:TARGETS[:CONTROLS]]")]
    gate: Option<GateStep>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Include the drawing instructions in the output
    #[arg(long)]
    primitives: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qcolorspace=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<VisualizeError>() {
            Some(VisualizeError::Parse(parse)) => {
                eprintln!("{parse}");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let layout = match &cli.layout {
        Some(path) => {
            Layout::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Layout::default(),
    };
    let renderer = StateRenderer::new(layout)?;

    let amplitudes: [String; 4] = cli
        .amplitudes
        .try_into()
        .map_err(|v: Vec<String>| anyhow::anyhow!("expected 4 amplitudes, got {}", v.len()))?;
    let mut request = VisualizeRequest::new(amplitudes)
        .with_canvas(Canvas::new(cli.width, cli.height, cli.margin));
    request.gate = cli.gate;

    let result = request.execute(&renderer)?;

    if cli.json {
        let mut value = serde_json::to_value(result.summary())?;
        if cli.primitives {
            value["frame"] = serde_json::to_value(&result.frame)?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", result.state_label());
    let probabilities = result.state.probabilities();
    let phases = result.state.phases();
    for (i, label) in BASIS_LABELS.iter().enumerate() {
        println!("  {label}  P={:.3}  ∠{:.2}", probabilities[i], phases[i]);
    }
    println!("State color: {}", result.state_color.hex);
    println!("Channels:");
    for chip in &result.channels {
        println!("  {}", chip.caption());
    }

    if cli.primitives {
        if result.frame.is_empty() {
            println!("(canvas too small, nothing to draw)");
        }
        for primitive in result.frame.iter() {
            println!("{}", serde_json::to_string(primitive)?);
        }
    }
    Ok(())
}

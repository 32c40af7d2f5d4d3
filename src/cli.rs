use clap::Parser;

use hudlens::telemetry::SimulationMode;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "hudlens.toml")]
    pub config: String,

    /// Noise seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulation mode: office, walking, driving, gaming, fitness (overrides config)
    #[arg(long)]
    pub mode: Option<SimulationMode>,

    /// Run without GUI (headless), logging telemetry once per second
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Headless run length in seconds; runs until Ctrl-C when omitted
    #[arg(long)]
    pub duration: Option<f64>,
}

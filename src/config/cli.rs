use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cache-dash")]
#[command(about = "Click the requested block while it is still in the L1 cache")]
pub struct CliConfig {
    /// Path to a TOML file with a `[game]` table
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit game signals as JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

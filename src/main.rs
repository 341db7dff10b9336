use anyhow::Context;
use cache_dash::adapters::{ChannelSource, RenderFormat, TokioTicker, WriterSink};
use cache_dash::utils::{logger, validation::Validate};
use cache_dash::{
    CliConfig, DataItem, GameConfig, GameController, GameSession, InboundEvent, TomlConfig,
};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting cache-dash");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入配置
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
                .into_game_config()
        }
        None => GameConfig::default(),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let rng = match cli.seed {
        Some(seed) => {
            tracing::info!("🎲 Using seed {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    let format = if cli.json {
        RenderFormat::JsonLines
    } else {
        print_intro(&config);
        RenderFormat::Text
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let controller = GameController::new(
        config,
        rng,
        TokioTicker::new(tx.clone()),
        WriterSink::new(std::io::stdout(), format),
    )?;

    tokio::spawn(read_player_input(tx));

    let mut session = GameSession::new(controller, ChannelSource::new(rx)).fast_tier_only(true);
    if let Err(e) = session.run().await {
        tracing::error!("❌ Game stopped: {} (fatal: {})", e, e.is_fatal());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(if e.is_fatal() { 1 } else { 2 });
    }

    tracing::info!("👋 Leaving with score {}", session.controller().score());
    Ok(())
}

fn print_intro(config: &GameConfig) {
    println!("Type `start` to begin a {}s round.", config.duration_seconds);
    println!("Cache HIT: the data is in L1 (fast). Cache MISS: the data is only in RAM (slow).");
    println!("Type the label of an L1 block to click it, `stop` to abandon, `quit` to exit.");
}

async fn read_player_input(tx: UnboundedSender<InboundEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("❌ Failed to read player input: {}", e);
                break;
            }
        };

        let Some(event) = parse_command(&line) else {
            if !line.trim().is_empty() {
                eprintln!("Unknown command: {}", line.trim());
            }
            continue;
        };

        if tx.send(event).is_err() || event == InboundEvent::Shutdown {
            return;
        }
    }

    // stdin 關閉時結束遊戲
    let _ = tx.send(InboundEvent::Shutdown);
}

fn parse_command(line: &str) -> Option<InboundEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "start" => Some(InboundEvent::RoundStartRequested),
        "stop" => Some(InboundEvent::RoundAbandonRequested),
        "quit" | "exit" => Some(InboundEvent::Shutdown),
        other => DataItem::parse(other).map(|item| InboundEvent::PlayerSelected { item }),
    }
}

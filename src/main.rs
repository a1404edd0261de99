use clap::Parser;
use snake_pit::config::Config;
use snake_pit::pit::SnakePit;
use snake_pit::rng::create_rng;
use snake_pit::server::{self, GenerationSnapshot, SharedSnapshot, StateStream};
use snake_pit::snake::Species;
use snake_pit::stats::ProgressLog;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "snake-pit")]
#[command(about = "Evolves neural network snakes with a genetic algorithm", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Override the generation limit from the config file
    #[arg(short, long)]
    generations: Option<u32>,

    /// forward_only or full_movement
    #[arg(short, long)]
    species: Option<Species>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    no_server: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        log::info!("Loading config from: {}", args.config);
        Config::load_from_file(&args.config)?
    } else {
        log::info!("Config file not found, using defaults and saving to: {}", args.config);
        let config = Config::default();
        config.save_to_file(&args.config)?;
        config
    };

    if let Some(generations) = args.generations {
        config.evolution.max_generations = generations;
    }
    if let Some(species) = args.species {
        config.population.species = species;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.no_progress {
        config.progress.enabled = false;
    }
    if args.no_server {
        config.server.enabled = false;
    }
    config.validate()?;

    let snapshot: SharedSnapshot = Arc::new(RwLock::new(None));

    if config.server.enabled {
        let server_state = snapshot.clone();
        let server_config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = server::run_server(server_config, server_state).await {
                log::error!("Server error: {}", e);
            }
        });
        log::info!("WebSocket server started on {}:{}", config.server.address, config.server.port);
    }

    let stream = StateStream::new(snapshot);
    tokio::task::spawn_blocking(move || run_evolution(config, stream))
        .await?
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    Ok(())
}

fn run_evolution(
    config: Config,
    stream: StateStream,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rng = create_rng(config.simulation.seed);
    let mut pit = SnakePit::new(&config, rng)?;

    let mut progress = if config.progress.enabled {
        match ProgressLog::create(&config.progress.directory) {
            Ok(progress) => Some(progress),
            Err(e) => {
                log::error!("Failed to create progress log: {}", e);
                None
            }
        }
    } else {
        None
    };

    for _ in 0..config.evolution.max_generations {
        pit.spawn()?;
        let (record, metrics) = pit.survive()?;

        if let Some(progress) = progress.as_mut() {
            if let Err(e) = progress.append(&record) {
                log::error!("Failed to write progress record: {}", e);
            }
        }

        if let Some(champion) = pit.champion() {
            stream.publish_blocking(GenerationSnapshot {
                record,
                metrics,
                replay: champion.replay(),
            });
        }
    }

    log::info!(
        "Evolution finished after {} generations, high score {}",
        pit.generation(),
        pit.high_score()
    );

    Ok(())
}

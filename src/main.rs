use dotenv::dotenv;
use orbhunt::Game;
use orbhunt::infra::{
    CavernObserver, CompositeObserver, DefaultObserver, ReplayFile, ReplayObserver,
};
use orbhunt::state::{GeneratorConfig, LevelGenerator};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn get_env_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|val| val.parse::<T>().ok())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbhunt=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn generator_config() -> GeneratorConfig {
    let defaults = GeneratorConfig::default();
    GeneratorConfig {
        rows: get_env_var("ORBHUNT_ROWS").unwrap_or(defaults.rows),
        cols: get_env_var("ORBHUNT_COLS").unwrap_or(defaults.cols),
        max_weight: get_env_var("ORBHUNT_MAX_WEIGHT").unwrap_or(defaults.max_weight),
        gold_chance: get_env_var("ORBHUNT_GOLD_CHANCE").unwrap_or(defaults.gold_chance),
        max_gold: defaults.max_gold,
        loop_chance: get_env_var("ORBHUNT_LOOP_CHANCE").unwrap_or(defaults.loop_chance),
        budget_slack: get_env_var("ORBHUNT_BUDGET_SLACK").unwrap_or(defaults.budget_slack),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let seed = get_env_var::<u64>("ORBHUNT_SEED");
    let replays_folder = env::var("ORBHUNT_REPLAYS_FOLDER").ok();
    let config = generator_config();

    info!("Cavern size: {}x{}", config.rows, config.cols);

    let mut generator = LevelGenerator::new(config, seed);
    let level = generator.generate()?;

    let mut observers: Vec<Box<dyn CavernObserver>> = vec![Box::new(DefaultObserver)];
    if let Some(folder) = replays_folder {
        match ReplayFile::new(&folder, Some(level.seed)) {
            Ok(replay_file) => {
                info!("Writing replay to {}", replay_file.path().display());
                observers.push(Box::new(ReplayObserver::new(replay_file)));
            }
            Err(e) => warn!("Could not create replay in {}: {}", folder, e),
        }
    }

    let mut game = Game::new(CompositeObserver::new(observers));
    let outcome = game.run(&level)?;

    if !outcome.is_success() {
        return Err(format!("run failed with seed {}", level.seed).into());
    }
    Ok(())
}

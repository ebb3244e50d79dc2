mod simulation;

use clap::Parser;
use easybj::simulation::shoe::{RandomShoe, Shoe};
use easybj::simulation::strategy::ChartStrategy;
use easybj::simulation::Simulator;
use easybj_drivers::{
    load_config, read_shoe_file, write_shoe_file, Result, Settings, DEFAULT_CONFIG_PATH,
};
use simulation::{Handler, ManualStrategy};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Deal from a file of rank labels instead of a random shoe
    #[arg(short = 'f', long, conflicts_with = "seed")]
    shoe_file: Option<PathBuf>,

    /// Seed of the random shoe
    #[arg(short = 'i', long)]
    seed: Option<u64>,

    /// Record the random shoe to a file
    #[arg(short, long, conflicts_with = "shoe_file")]
    record: Option<PathBuf>,

    /// Play this many hands automatically with the computed strategy chart
    #[arg(short = 'a', long = "auto", value_name = "NUM", value_parser = clap::value_parser!(u64).range(1..))]
    hands: Option<u64>,

    /// Print only the session summary
    #[arg(short, long, requires = "hands")]
    silent: bool,

    /// Print more logs (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Plays until the requested number of hands, or until the player quits. Running out of a
/// file-based shoe ends the session.
fn run<S: Shoe>(mut simulator: Simulator<S>, args: &CommandLineArgs) -> Result<Simulator<S>> {
    let mut handler = Handler::new(args.silent);
    match args.hands {
        Some(hands) => {
            let tables = easybj::calculate()?;
            let mut strategy = ChartStrategy::new(&tables.strategy);
            for _ in 0..hands {
                match simulator.play_game(&mut strategy, &mut handler) {
                    Err(easybj::Error::ShoeExhausted(cards)) => {
                        warn!(cards, "shoe ran out");
                        break;
                    }
                    result => result?,
                };
            }
            print!("{}", handler.session_summary(&simulator, tables.advantage));
        }
        None => {
            let stdin = std::io::stdin();
            let mut strategy = ManualStrategy::new(stdin.lock(), std::io::stdout());
            loop {
                match simulator.play_game(&mut strategy, &mut handler) {
                    Err(easybj::Error::ShoeExhausted(cards)) => {
                        warn!(cards, "shoe ran out");
                        break;
                    }
                    result => result?,
                };
                if !strategy.again()? {
                    break;
                }
            }
        }
    }
    info!(
        games = simulator.games_played(),
        balance = simulator.balance(),
        "session finished"
    );
    Ok(simulator)
}

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    let (config, config_path) = load_config(&args.config)?;
    let settings = Settings::try_from(config)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(settings.log_level.raised(args.verbose)))
        .with_writer(std::io::stderr)
        .init();
    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded config file"),
        None => info!("no config file found, using defaults"),
    }
    debug!(?args);

    if let Some(path) = &args.shoe_file {
        let shoe = read_shoe_file(path)?;
        info!(path = %path.display(), cards = shoe.remaining(), "loaded shoe file");
        run(Simulator::new(shoe), &args)?;
        return Ok(());
    }

    let mut shoe = match args.seed {
        Some(seed) => RandomShoe::with_seed(seed),
        None => RandomShoe::from_entropy(),
    };
    if args.record.is_some() {
        shoe = shoe.recording();
    }
    let simulator = run(Simulator::new(shoe), &args)?;
    if let Some(path) = &args.record {
        let cards = simulator.shoe().recorded().unwrap_or_default();
        write_shoe_file(path, cards)?;
        info!(path = %path.display(), cards = cards.len(), "recorded shoe");
    }
    Ok(())
}

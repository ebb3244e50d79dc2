use clap::Parser;
use easybj_drivers::export::export_to_yaml;
use easybj_drivers::render::{render_advantage, render_any};
use easybj_drivers::{
    load_config, parse_table_names, select_table, OutputFormat, Result, Settings,
    DEFAULT_CONFIG_PATH,
};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Output format (text or yaml), overriding the config file
    #[arg(short, long)]
    format: Option<String>,

    /// A table to print, overriding the config file. May be repeated.
    #[arg(short, long = "table")]
    tables: Vec<String>,

    /// Print more logs (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    let (config, config_path) = load_config(&args.config)?;

    let mut settings = Settings::try_from(config)?;
    if let Some(format) = &args.format {
        settings.format = format.parse()?;
    }
    if !args.tables.is_empty() {
        settings.tables = parse_table_names(&args.tables)?;
    }
    let settings = settings;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(settings.log_level.raised(args.verbose)))
        .with_writer(std::io::stderr)
        .init();
    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded config file"),
        None => info!("no config file found, using defaults"),
    }
    debug!(?settings);

    let tables = easybj::calculate()?;
    match settings.format {
        OutputFormat::Text => {
            for name in &settings.tables {
                println!("{}", render_any(select_table(&tables, *name)));
            }
            print!("{}", render_advantage(tables.advantage));
        }
        OutputFormat::Yaml => print!("{}", export_to_yaml(&tables, &settings.tables)?),
    }
    Ok(())
}

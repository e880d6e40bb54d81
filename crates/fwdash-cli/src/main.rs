mod args;
mod commands;

use clap::{Parser, Subcommand};

use args::{FilterArgs, LevelArg};

#[derive(Debug, Parser)]
#[command(name = "fwdash-cli")]
#[command(about = "Free-Work contractor mission dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the number of missions matching the filters
    Count {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Fetch every matching mission and print the table and charts
    Fetch {
        #[command(flatten)]
        filters: FilterArgs,
        /// Only show missions of these experience levels (repeatable)
        #[arg(long = "level", value_enum)]
        levels: Vec<LevelArg>,
        /// Print a JSON snapshot instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the API query URL built from the filters
    Url {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = fwdash_core::load_app_config()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Count { filters }) => commands::run_count(&config, &filters).await?,
        Some(Commands::Fetch {
            filters,
            levels,
            json,
        }) => commands::run_fetch(&config, &filters, &levels, json).await?,
        Some(Commands::Url { filters }) => commands::run_url(&config, &filters)?,
        None => println!("no command given; try `fwdash-cli --help`"),
    }

    Ok(())
}

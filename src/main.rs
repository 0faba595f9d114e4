use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use splaycli::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify and collect recently played tracks
    Run(RunOptions),

    /// Show the most recently collected plays
    Show(ShowOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    /// Collect plays back to this point in time (RFC 3339 or YYYY-MM-DD);
    /// defaults to one day ago
    #[clap(long)]
    pub until: Option<String>,

    /// Run without a lower bound; the auth flow completes but no history
    /// is fetched
    #[clap(long)]
    pub no_bound: bool,

    /// Number of plays requested per page (1-50)
    #[clap(long, default_value_t = 10)]
    pub limit: u32,

    /// Start pagination from this cursor (epoch milliseconds) instead of now
    #[clap(long)]
    pub before: Option<i64>,

    /// Directory for result artifacts
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Directory to look for result artifacts in
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Run(opt) => {
            cli::run(opt.until, opt.no_bound, opt.limit, opt.before, opt.output_dir).await
        }
        Command::Show(opt) => cli::show(opt.output_dir).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

use clap::Parser;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Enumerate installed Joomla components and their exposed files", long_about = None)]
pub struct Cli {
    /// The Joomla URL to scan (http:// or https://)
    #[arg(short = 'u', long)]
    pub url: String,

    /// Number of components classified concurrently (default: CPU count)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// User agent to send (default: a random desktop browser string)
    #[arg(short = 'a', long = "user-agent")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short = 'T', long, default_value_t = 5_u64)]
    pub timeout: u64,

    /// Component catalog, one id per line (default: bundled catalog)
    #[arg(short = 'c', long)]
    pub catalog: Option<PathBuf>,

    /// Save the report to file (.json for JSON, anything else for text)
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

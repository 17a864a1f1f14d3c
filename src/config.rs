// Command line flags.

use crate::api::DEFAULT_API_URL;
use clap::Parser;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "wiki",
    about = "Search the free encyclopedia and read articles from the terminal",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print the version number.
    #[arg(short = 'v')]
    pub version: bool,

    /// A search value; prompts for one when missing or empty.
    #[arg(short = 's', value_name = "TERM")]
    pub search: Option<String>,

    /// The number of results to be displayed.
    #[arg(short = 'l', value_name = "N", default_value_t = 5)]
    pub limit: u32,

    /// Write the article to a file instead of the console.
    #[arg(short = 'f')]
    pub write_to_file: bool,

    /// API endpoint serving both opensearch and query requests.
    #[arg(long, env = "WIKI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory that `-f` writes articles into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The initial search term, if one was given and is not empty.
    pub fn initial_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

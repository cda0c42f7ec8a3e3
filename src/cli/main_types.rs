use crate::core::query::OutputField;
use crate::display::OutputFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "poetrydb")]
#[command(about = "Search and browse poems from the PoetryDB API")]
#[command(version)]
#[command(after_help = "Examples:
  poetrydb search --author poe --title raven   # Search by author and title
  poetrydb search --sample                     # Run the sample search
  poetrydb authors                             # All authors, grouped by letter
  poetrydb titles --format html                # All titles as HTML
  poetrydb random                              # A random poem
  poetrydb interactive                         # Fill in the search form line by line

Environment Variables:
  POETRYDB_URL   PoetryDB base URL (default: https://poetrydb.org)
  RUST_LOG       Log filter, e.g. poetrydb_cli=debug")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// PoetryDB base URL
    #[arg(long, global = true, env = "POETRYDB_URL")]
    pub base_url: Option<String>,

    /// Output format: text, html or json
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search poems by author, title, lines, linecount or poemcount
    Search(SearchArgs),
    /// List all authors grouped by first letter
    Authors,
    /// List all titles grouped by first letter
    Titles,
    /// Show a random poem
    Random {
        /// Number of random poems to fetch
        #[arg(long, short = 'n')]
        count: Option<u32>,
    },
    /// Fill in the search form and run actions line by line
    Interactive,
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Default, Clone)]
#[command(after_help = "Examples:
  poetrydb search --author shakespeare --lines \"turn'd\"
  poetrydb search --author poe --output title,linecount
  poetrydb search --author dickinson --poemcount 3")]
pub struct SearchArgs {
    /// Name, or part of the name, of the author
    #[arg(long, help_heading = "Search Fields")]
    pub author: Option<String>,

    /// Title, or part of the title
    #[arg(long, help_heading = "Search Fields")]
    pub title: Option<String>,

    /// Part of a line or lines of the poem
    #[arg(long, help_heading = "Search Fields")]
    pub lines: Option<String>,

    /// Exact number of lines
    #[arg(long, help_heading = "Search Fields")]
    pub linecount: Option<String>,

    /// Number of poems to return
    #[arg(long, help_heading = "Search Fields")]
    pub poemcount: Option<String>,

    /// Fill the form with the sample search (shakespeare / Sonnet / turn'd)
    #[arg(long)]
    pub sample: bool,

    /// Limit returned fields (comma-separated: author,title,lines,linecount,all)
    #[arg(long, value_delimiter = ',', help_heading = "Output Options")]
    pub output: Vec<OutputField>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    #[command(after_help = "Examples:
  poetrydb config set --base-url https://poetrydb.org
  poetrydb config set --timeout 10 --format html")]
    Set {
        /// PoetryDB base URL
        #[arg(long)]
        base_url: Option<String>,
        /// HTTP timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Default output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

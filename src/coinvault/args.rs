use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coinvault")]
#[command(version = env!("COINVAULT_LONG_VERSION"))]
#[command(about = "Catalogue a coin collection from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault directory (defaults to $COINVAULT_HOME, then the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Use the vault in the user data directory
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Images to copy into the vault alongside the record.
#[derive(Args, Debug, Default)]
pub struct ImageArgs {
    /// Obverse photo
    #[arg(long, value_name = "PATH")]
    pub obverse: Option<PathBuf>,

    /// Reverse photo
    #[arg(long, value_name = "PATH")]
    pub reverse: Option<PathBuf>,

    /// Flag of the issuing country
    #[arg(long, value_name = "PATH")]
    pub flag: Option<PathBuf>,

    /// Shield of the issuing country
    #[arg(long, value_name = "PATH")]
    pub shield: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a coin to the collection
    #[command(alias = "a")]
    Add {
        /// Field assignments (e.g. --set country=España --set year=1975)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        #[command(flatten)]
        images: ImageArgs,
    },

    /// List every coin
    #[command(alias = "ls")]
    List,

    /// Show every field of a coin
    #[command(alias = "v")]
    View {
        /// Coin code (e.g. ESP-1975-000001)
        id: String,
    },

    /// Search the collection
    #[command(alias = "s")]
    Search {
        /// Text to look for in the configured search fields
        #[arg(required_unless_present = "criteria", conflicts_with = "criteria")]
        text: Option<String>,

        /// Strict criteria, all of which must match (e.g. --where country=spa)
        #[arg(short = 'w', long = "where", value_name = "KEY=TEXT")]
        criteria: Vec<String>,
    },

    /// Change fields of a coin
    #[command(alias = "u")]
    Update {
        /// Coin code
        id: String,

        /// Field assignments (e.g. --set condition=XF)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        #[command(flatten)]
        images: ImageArgs,
    },

    /// Remove a coin
    #[command(alias = "rm")]
    Delete {
        /// Coin code
        id: String,
    },

    /// Collection statistics
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, images-dir, search-fields)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// List the fields a coin carries
    Fields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_assignments_and_images() {
        let cli = Cli::parse_from([
            "coinvault",
            "add",
            "--set",
            "country=España",
            "-s",
            "year=1975",
            "--obverse",
            "front.jpg",
        ]);
        match cli.command {
            Some(Commands::Add { set, images }) => {
                assert_eq!(set, vec!["country=España", "year=1975"]);
                assert_eq!(images.obverse, Some(PathBuf::from("front.jpg")));
                assert!(images.reverse.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn search_takes_text_or_criteria() {
        let cli = Cli::parse_from(["coinvault", "search", "peseta"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Search { text: Some(_), .. })
        ));

        let cli = Cli::parse_from(["coinvault", "search", "--where", "country=spa"]);
        match cli.command {
            Some(Commands::Search { text, criteria }) => {
                assert!(text.is_none());
                assert_eq!(criteria, vec!["country=spa"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["coinvault", "search"]).is_err());
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = Cli::parse_from(["coinvault", "list", "--dir", "/tmp/vault", "-vv"]);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/vault")));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.global);
    }
}

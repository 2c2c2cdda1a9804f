//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Compile markdown pages into svelte routes
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: mdroute.toml)
    #[arg(short = 'C', long, global = true, default_value = "mdroute.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile every page and write routes plus the registry
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Compile every page and print the navigation registry
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Remove generated route directories before building
    #[arg(short, long)]
    pub dev: bool,

    /// Artifact directory, relative to the routes directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["mdroute", "build", "--dev", "-o", "guides", "-V"]);
        assert!(cli.verbose);
        let Commands::Build { build_args } = cli.command else {
            panic!("Expected build");
        };
        assert!(build_args.dev);
        assert_eq!(build_args.output, Some(PathBuf::from("guides")));
    }

    #[test]
    fn test_parse_query_with_config() {
        let cli = Cli::parse_from(["mdroute", "-C", "site.toml", "q", "--pretty"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        let Commands::Query { args } = cli.command else {
            panic!("Expected query");
        };
        assert!(args.pretty);
        assert!(args.output.is_none());
    }
}

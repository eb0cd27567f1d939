//! Command-line argument definitions for the Strata CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Strata metamodel tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input declaration file (TOML)
    #[arg(help = "Path to the input declaration file")]
    pub input: String,

    /// Path to the output report; printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Check every collection's bounds during assembly, whatever the
    /// configuration says
    #[arg(long)]
    pub eager: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::parse_from(["strata", "model.toml"]);
        assert_eq!(args.input, "model.toml");
        assert!(args.output.is_none());
        assert!(args.config.is_none());
        assert!(!args.eager);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::parse_from([
            "strata",
            "model.toml",
            "--output",
            "report.txt",
            "-c",
            "strata.toml",
            "--eager",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output.as_deref(), Some("report.txt"));
        assert_eq!(args.config.as_deref(), Some("strata.toml"));
        assert!(args.eager);
        assert_eq!(args.log_level, "debug");
    }
}

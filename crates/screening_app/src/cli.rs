use std::path::PathBuf;

use clap::Parser;
use screening_core::OperationalProfile;

use crate::logging::LogDestination;

/// Submit an orbital-tracking file for conjunction screening.
#[derive(Debug, Parser)]
#[command(name = "screening_app", version)]
pub struct Cli {
    /// TLE / catalog file to screen.
    pub file: PathBuf,

    /// RON configuration file. A missing default file is not an error.
    #[arg(long, default_value = "screening.ron")]
    pub config: PathBuf,

    /// Screening service root, e.g. https://stx.example.com/
    #[arg(long)]
    pub base_url: Option<String>,

    /// Bearer credential for the screening service.
    #[arg(long, env = "SCREENING_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Maximum number of catalog objects to screen.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Operational profile: ISS_CLASS, COMMERCIAL or CONSTELLATION.
    #[arg(long, value_parser = parse_profile)]
    pub profile: Option<OperationalProfile>,

    #[arg(long)]
    pub poll_interval_secs: Option<u64>,

    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Request the consolidated summary report once screening finishes.
    #[arg(long)]
    pub summary: bool,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_profile(raw: &str) -> Result<OperationalProfile, String> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_and_limit() {
        let cli = Cli::try_parse_from([
            "screening_app",
            "fleet.tle",
            "--limit",
            "500",
            "--profile",
            "iss-class",
            "--summary",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("fleet.tle"));
        assert_eq!(cli.limit, Some(500));
        assert_eq!(cli.profile, Some(OperationalProfile::IssClass));
        assert!(cli.summary);
    }

    #[test]
    fn rejects_unknown_profile() {
        assert!(Cli::try_parse_from(["screening_app", "f.tle", "--profile", "LEO"]).is_err());
    }
}

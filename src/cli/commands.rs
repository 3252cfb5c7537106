// CLI command definitions

use super::revision::{BuildCommand, ReviseCommand, SummaryCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "service-revision",
    version,
    about = "Build container service descriptors and merge them into their next revision",
    long_about = "A standalone CLI tool that builds a service descriptor from an image, a name and environment variables or a configuration file, and merges it into a previously deployed descriptor to produce the next revision"
)]
pub struct CliArgs {
    /// Enable debug logging (written to stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a descriptor for a first deployment
    Build(BuildCommand),

    /// Build a descriptor and merge it into the previously deployed one
    Revise(ReviseCommand),

    /// Show a summary of a descriptor file
    Summary(SummaryCommand),
}

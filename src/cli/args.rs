use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gdxatlas")]
#[command(version, about = "libGDX texture-packer atlas inspector", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Dump every parsed entry and diagnostic as JSON
    Entries(CommonArgs),
    /// Dump regions grouped by source image as JSON
    Pages(CommonArgs),
    /// Report diagnostics without writing output
    Check(CommonArgs),
}

impl Command {
    pub fn args(&self) -> &CommonArgs {
        match self {
            Command::Entries(args) | Command::Pages(args) | Command::Check(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input .atlas files
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for JSON files [default: stdout]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Exit with an error if any atlas produced diagnostics
    #[arg(long)]
    pub strict: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

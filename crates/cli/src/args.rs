use clap::{Parser, Subcommand};

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    pub obj_path: String,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Files to validate.
    #[arg(required = true)]
    pub obj_paths: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print stream counts and bounds of a model.
    Info(InfoArgs),
    /// Load models and fail on the first one that is malformed.
    Check(CheckArgs),
}

use clap::Parser;
use trellis_viewer::{Args, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ViewerConfig::from(Args::parse());
    trellis_viewer::run(config)
}

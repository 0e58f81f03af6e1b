use clap::Parser;

mod args;
mod info;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = args::Args::parse();
    match args.command {
        args::Commands::Info(args) => info::info_command(args),
        args::Commands::Check(args) => info::check_command(args),
    }
}

use clap::Parser;
use retro_studio::cli::Args;

fn main() -> anyhow::Result<()> {
    retro_studio::init_logger();
    retro_studio::run(Args::parse())
}

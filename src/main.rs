use anyhow::Result;
use clap::Parser;
use cmds::AlbumCli;

mod catalog;
mod cmds;
mod config;

fn main() -> Result<()> {
    let args = AlbumCli::parse();
    simplelog::SimpleLogger::init(config::log_level(args.verbose), Default::default())?;

    cmds::handle_commands(args)
}

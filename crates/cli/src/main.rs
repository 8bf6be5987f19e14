use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::list::ListArgs;
use dirscan_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "dirscan",
    version,
    about = "List a directory sorted by name, size or modification time"
)]
pub struct Cli {
    #[command(flatten)]
    pub list: ListArgs,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::list::run(cli.list)
}

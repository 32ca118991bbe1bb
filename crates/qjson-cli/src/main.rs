use clap::Parser;
use qjson_cli::{init_logging, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    std::process::exit(run(&cli));
}

mod cli;
mod extract_cmd;
mod fill_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; stdout carries JSON or PDF bytes.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let result = if cli.fill {
        fill_cmd::run(
            &cli.file,
            cli.out.as_deref(),
            cli.print,
            cli.tool_config(),
        )
    } else {
        extract_cmd::run(&cli.file)
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

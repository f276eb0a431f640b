mod handlers;
pub mod parse;

use clap::Parser;
use env_logger::Env;
pub use parse::Cli;

use crate::core::error::GraphError;

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--debug`.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

pub fn run() -> Result<(), GraphError> {
    let cli = parse::Cli::parse();
    init_logging(cli.debug);
    match cli.cmd {
        parse::Command::Plot(a) => handlers::plot(a),
        parse::Command::Summary(a) => handlers::summary(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}

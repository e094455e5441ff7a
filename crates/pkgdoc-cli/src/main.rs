//! pkgdoc CLI entry point.

use clap::Parser;
use miette::Result;
use pkgdoc_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    if args.no_color || !logger::should_use_colors() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(resolve_args, config),
        cli::Command::Batch(batch_args) => commands::batch_execute(batch_args, config),
        cli::Command::Locate(locate_args) => commands::locate_execute(locate_args, config),
        cli::Command::Config(config_args) => commands::config_execute(config_args, config),
    };

    result.map_err(error::cli_error_to_miette)
}

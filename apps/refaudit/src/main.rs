//! Refaudit CLI binary entry point.
//! Delegates to the library for the validate run and prints results.

use clap::Parser;
use refaudit::cli::{Cli, Commands};
use refaudit::{audit, config, output, utils};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate {
            repo_root,
            input,
            output: report_out,
            threshold,
            strategy,
            format,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                input.as_deref(),
                report_out.as_deref(),
                threshold,
                strategy,
                format.as_deref(),
            );
            // Friendly note if no refaudit config was found
            if eff.format != "json" && config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No refaudit.toml found; using defaults."
                );
            }
            match audit::run_audit(&eff) {
                Ok(res) => {
                    output::print_audit(&res, &eff.format, &eff.output);
                    if !res.summary.passed() {
                        std::process::exit(2);
                    }
                }
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(e.exit_code());
                }
            }
        }
    }
}

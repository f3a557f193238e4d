//! Binary orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! builds the application and hands it to the launcher.

use std::sync::{Arc, Mutex};
use tracing::debug;

use blockchainincubator::cli::Args;
use blockchainincubator::config::{CONFIG_ENV, default_config_path, load_config};
use blockchainincubator::output as out;
use blockchainincubator::{
    App, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS, Source, launch, shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application and return the process exit code.
pub fn run(args: Args) -> i32 {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return EXIT_SUCCESS;
    }

    // CLI flags override file values
    let file_cfg = match load_config() {
        Ok(c) => c,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return EXIT_FAILURE;
        }
    };
    let cfg = args.to_config(file_cfg);

    let guard_opt = init_tracing(cfg.effective_log_level(), cfg.log_file.as_deref(), cfg.json);

    // A blocked stdin read is restarted after the signal and never sees the
    // flag, so stdin runs (and any second interrupt) exit from the handler.
    let reads_stdin = Source::from_arg(&cfg.input) == Source::Stdin;

    // The guard must be dropped on SIGINT too, to flush file logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = ctrlc::set_handler(move || {
            let repeated = shutdown::request();
            out::print_warn("Received interrupt; shutting down gracefully...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
            if reads_stdin || repeated {
                std::process::exit(EXIT_INTERRUPTED);
            }
        }) {
            out::print_warn(&format!("Could not install interrupt handler: {e}"));
        }
    }

    debug!(?cfg, "Starting blockchainincubator");

    let app = App::new(cfg.verbose);
    let code = launch(&app, &cfg);

    // Flush logs before the caller exits the process
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    code
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

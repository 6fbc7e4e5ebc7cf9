//! Command-line front end for the ha-sip hub bridge.
//!
//! Loads configuration, installs the tracing subscriber, and exposes the hub
//! operations as subcommands so they can be driven from scripts or a SIP
//! dialplan.

pub mod cli;
pub mod config;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber from the logging config.
pub fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

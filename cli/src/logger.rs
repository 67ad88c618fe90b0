use std::sync::OnceLock;

static LOGGER: OnceLock<()> = OnceLock::new();

/// Set up log levels, formatting, and other configurations for the logger
pub struct Logger;

impl Logger {
    pub fn init() {
        LOGGER.get_or_init(|| {
            // No logs shown by default, stdout carries the template and stderr the errors
            // Enable logs output with "export RUST_LOG=debug" in terminal
            let result = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("off"),
            )
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .try_init();

            if let Err(error) = result {
                eprintln!("Failed to set up logging: {error}");
            }
        });
    }
}

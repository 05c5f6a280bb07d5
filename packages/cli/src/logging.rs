// ABOUTME: Tracing subscriber installation for the CLI
// ABOUTME: RUST_LOG wins; otherwise the configured AGENTDASH_LOG filter is used

use tracing_subscriber::EnvFilter;

use agentdash_config::Config;

pub fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

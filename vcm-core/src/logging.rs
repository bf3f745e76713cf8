use std::io;

// Logs go to stderr so that `vcmctl list --format json` and friends can be piped
pub fn setup_for_cli(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}

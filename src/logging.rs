use env_logger::Env;

// Info by default so load/create/delete outcomes land in the terminal;
// RUST_LOG still overrides.
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

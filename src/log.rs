use log::LevelFilter;

/// Initializes the global logger. Verbosity defaults to warnings and can be
/// overridden with `RUST_LOG`.
pub fn init() {
  pretty_env_logger::formatted_builder()
    .filter_level(LevelFilter::Warn)
    .parse_default_env()
    .init();
}

use env_logger::Env;

/// Initialize `env_logger` for a benchmark binary.
///
/// `RUST_LOG` wins when set; otherwise everything at `info` and above is shown.
/// Calling this twice is harmless.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

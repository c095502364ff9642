//! Log initialisation.

/// Installs `env_logger` with `filter` (normally `JARVIS_LOG`) as the default.
///
/// `RUST_LOG`, when set, still takes precedence. Output goes to stderr so
/// command output on stdout stays clean. Calling this more than once is a
/// no-op.
pub fn init(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_secs()
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init("warn");
        super::init("debug");
        log::warn!("logger still usable");
    }
}

#![forbid(unsafe_code)]
//! NeoDash UI wasm entry point and native stub fallback.

#[cfg(target_arch = "wasm32")]
fn main() {
    neodash_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), neodash_telemetry::TelemetryError> {
    use neodash_telemetry::{LoggingConfig, init_logging};

    init_logging(&LoggingConfig::from_env()?)?;
    tracing::warn!(
        "neodash-ui is intended for wasm32; build with `trunk build` or `cargo build --target wasm32-unknown-unknown`"
    );
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_main_logs_warning() {
        // A subscriber may already be installed by the harness; only panics fail.
        let _ = main();
    }
}

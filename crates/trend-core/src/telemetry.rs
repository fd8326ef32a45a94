// File: crates/trend-core/src/telemetry.rs
// Summary: Opt-in tracing setup for binaries embedding trend-core.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (default `info`)
/// when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is off or a global subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

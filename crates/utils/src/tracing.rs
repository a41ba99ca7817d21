// Copyright 2023 Ulvetanna Inc.

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Later calls are no-ops, so tests and benches may call this freely.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_target(false))
		.try_init();
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Intended to be called once by
/// the embedding binary; repeated calls are ignored so test binaries can
/// call it freely.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolshed=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}

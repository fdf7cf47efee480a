use scancache_core::SCANCACHE_LOG_VAR;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// The filter comes from `SCANCACHE_LOG`, then `RUST_LOG`, then `default_directive`.
/// Output goes to stderr so stdout stays free for JSON bodies.
pub fn init(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = build_filter(default_directive)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn build_filter(
    default_directive: &str,
) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    if let Ok(directive) = std::env::var(SCANCACHE_LOG_VAR) {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return Ok(filter);
        }
    }

    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Emit a structured event for cache operations
pub fn cache_event(barcode: &str, hit: bool) {
    if hit {
        debug!(barcode = %barcode, "cache_hit");
    } else {
        debug!(barcode = %barcode, "cache_miss");
    }
}

/// Emit a structured event for a swallowed persistence failure
pub fn persistence_failed(engine: &str, error: &dyn std::error::Error) {
    warn!(
        engine = %engine,
        error = %error,
        "persistence failed, keeping in-memory state"
    );
}

//! Log subscriber setup for `oc-info`.
//!
//! The report owns stdout, so every log line goes to stderr. Failures are
//! already printed as error lines by the CLI; the pipeline only logs them at
//! `debug`, which keeps a default run free of duplicate messages.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber.
///
/// `level` applies when `RUST_LOG` is unset; `json` switches the stderr
/// output to one JSON object per line. A subscriber installed earlier in the
/// process wins and this call becomes a no-op.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}

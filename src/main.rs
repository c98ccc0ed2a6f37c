use std::io;

use subdispatch::cli::{output, register_all};
use subdispatch::{AppInfo, Dispatcher, ExitCode};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Prefix of the environment variables overriding name, summary and version.
const ENV_PREFIX: &str = "SUBDISPATCH";

fn main() -> std::process::ExitCode {
    setup_logging();

    let app = AppInfo::default()
        .with_summary(env!("CARGO_PKG_DESCRIPTION"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .apply_env_overrides(ENV_PREFIX);
    let app = match app {
        Ok(app) => app,
        Err(e) => {
            let _ = output::error(&mut io::stderr(), &e);
            return e.exit_code().into();
        }
    };

    let mut dispatcher = Dispatcher::new(app);
    register_all(&mut dispatcher);
    let code: ExitCode = dispatcher.execute();
    code.into()
}

fn setup_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
    tracing::debug!("logging initialised");
}

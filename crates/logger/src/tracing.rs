use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::filter;
use tracing_subscriber::fmt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use tracing_subscriber::{self, layer::SubscriberExt};

fn env_filter() -> filter::EnvFilter {
    filter::EnvFilter::builder()
        .with_regex(true)
        .try_from_env()
        .unwrap_or_else(|_| {
            filter::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy("")
        })
}

/// Log to stderr, filtered by `RUST_LOG`, defaults to info.
///
/// ### log everything in module:
/// Filter directives like:
/// `RUST_LOG=crate::module::submodule=trace,crate::module=info,error`
/// which logs everything in `submodule`, in `module` things are logged at level
/// info, warn or error and for the rest of the crate and all dependencies only
/// errors are logged
///
/// Messages that went through a `ThrottledEmitter` with the default sink end
/// up here too, `RUST_LOG` filters them after the throttle made its decision.
/// Their target is `throttled_logger::sink`, the `caller` field holds the
/// file and line that emitted them.
///
/// for full docs see: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn setup() {
    let fmt = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    tracing_subscriber::Registry::default()
        .with(ErrorLayer::default())
        .with(fmt.with_filter(env_filter()))
        .init();
    tracing::info!("Started logging & tracing to stderr");
}

/// Safe to call from every test, only the first call installs anything.
pub fn setup_for_tests() {
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = color_eyre::install();

        let test_subscriber = fmt::layer()
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_ansi(true)
            .pretty()
            .with_filter(filter::EnvFilter::from_default_env());
        let _ = tracing_subscriber::registry()
            .with(test_subscriber)
            .with(ErrorLayer::default())
            .try_init();
    })
}

use std::env;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

pub fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

/// Opens `url` in the default web browser, skipping if "none" is set in the
/// BROWSER environment variable.
pub fn open_in_browser(url: &str) {
    if env::var("BROWSER").unwrap_or_default() == "none" {
        return;
    }
    info!("opening {url} in the default browser");
    if let Err(e) = webbrowser::open(url) {
        warn!("failed to open browser: {e}");
    }
}

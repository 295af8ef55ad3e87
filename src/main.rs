use crate::api::HttpListingApi;
use crate::app::dispatch::Dispatcher;
use crate::app::App;
use crate::config::Config;
use crate::map::{DeniedPosition, FixedPosition, HeadlessMap, MapView, PositionSource};
use crate::responses::html_error_response;
use crate::router::handle;
use crate::store::ListingStore;
use astra::Server;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod app;
mod config;
mod domain;
mod errors;
mod map;
mod page;
mod responses;
mod router;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LISTING_MAP_LOG_FORMAT").unwrap_or_default();

    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    // 1️⃣ Configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // 2️⃣ Components, wired explicitly
    let api = match HttpListingApi::new(&config.api_base_url, &config.user_agent) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "listings client could not be built");
            std::process::exit(1);
        }
    };
    let positions: Arc<dyn PositionSource> = match config.device_position {
        Some(position) => Arc::new(FixedPosition(position)),
        None => Arc::new(DeniedPosition),
    };

    let dispatcher = Dispatcher::new(Arc::new(api), positions);
    let map = MapView::new(HeadlessMap::new(), config.default_center);
    let mut app = App::new(map, ListingStore::new(), dispatcher)
        .with_render_wait(config.render_wait);

    // Responses land when the first page is requested.
    app.start();

    // 3️⃣ Serve the page
    let app = Mutex::new(app);
    info!(addr = %config.listen_addr, backend = %config.api_base_url, "starting server");

    let server = Server::bind(&config.listen_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}

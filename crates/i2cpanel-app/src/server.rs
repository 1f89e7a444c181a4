use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use i2cpanel_core::BusHandle;
use parking_lot::Mutex;
use warp::{Filter, Rejection, Reply};

use crate::form::{self, PanelForm, PanelState};
use crate::view;

const STYLESHEET: &str = include_str!("../assets/panel.css");

const MAX_FORM_BYTES: u64 = 16 * 1024;

pub type SharedBus = Arc<Mutex<BusHandle>>;

fn with_bus(bus: SharedBus) -> impl Filter<Extract = (SharedBus,), Error = Infallible> + Clone {
    warp::any().map(move || bus.clone())
}

pub fn routes(bus: SharedBus) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::get()
        .and(warp::path::end())
        .map(|| warp::reply::html(view::render(&PanelState::default())));

    let submit = warp::post()
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form())
        .and(with_bus(bus))
        .map(|form: PanelForm, bus: SharedBus| {
            log::debug!("form: {form:?}");
            // Writes block the request thread until the bridge answers.
            let state = form::apply(&form, &mut *bus.lock());
            warp::reply::html(view::render(&state))
        });

    let css = warp::get()
        .and(warp::path!("panel.css"))
        .map(|| warp::reply::with_header(STYLESHEET, "content-type", "text/css"));

    index.or(submit).or(css)
}

/// Serves the panel until Ctrl-C.
pub async fn serve(listen: SocketAddr, bus: SharedBus) -> Result<(), warp::Error> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Ctrl-C handler failed: {e}");
        }
        log::info!("shutting down");
    };
    let (address, server) =
        warp::serve(routes(bus)).try_bind_with_graceful_shutdown(listen, shutdown)?;
    log::info!("I2C panel listening on http://{address}");
    server.await;
    Ok(())
}

//! HTTP query interface.
//!
//! Two endpoints make up the externally visible contract: `GET /signals`
//! returns the latest published set and `GET /` is a liveness check. The
//! query side never surfaces a data error; it serves whatever the last
//! completed cycle published, possibly an empty array.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use fxsignal_core::types::Signal;
use fxsignal_engine::SignalFeed;
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Wire representation of one signal.
#[derive(Debug, Serialize)]
pub struct SignalDto {
    pub pair: String,
    pub signal: &'static str,
    pub expiry: String,
    pub time: String,
}

impl From<&Signal> for SignalDto {
    fn from(signal: &Signal) -> Self {
        Self {
            pair: signal.pair.clone(),
            signal: signal.direction.as_str(),
            expiry: signal.expiry.clone(),
            time: signal.generated_at.format("%H:%M:%S").to_string(),
        }
    }
}

/// Build the service router over a signal feed.
pub fn router(feed: SignalFeed) -> Router {
    Router::new()
        .route("/signals", get(signals))
        .route("/", get(home))
        .layer(CorsLayer::permissive())
        .with_state(feed)
}

async fn signals(State(feed): State<SignalFeed>) -> Json<Vec<SignalDto>> {
    let set = feed.latest().await;
    Json(set.signals.iter().map(SignalDto::from).collect())
}

async fn home() -> &'static str {
    "FX signal service running"
}

/// Bind and serve until the shutdown future resolves.
pub async fn serve(
    addr: SocketAddr,
    feed: SignalFeed,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = router(feed);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use fxsignal_core::types::{Direction, SignalSet};

    fn feed_with_signals() -> SignalFeed {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 2, 30).unwrap();
        SignalFeed::fixed(SignalSet::new(
            vec![
                Signal::new("EURUSD", Direction::Buy, at),
                Signal::new("USDJPY", Direction::Sell, at),
            ],
            at,
        ))
    }

    #[tokio::test]
    async fn test_signals_handler_shape() {
        let Json(body) = signals(State(feed_with_signals())).await;

        assert_eq!(body.len(), 2);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value[0],
            serde_json::json!({
                "pair": "EURUSD",
                "signal": "BUY",
                "expiry": "1 Minute",
                "time": "10:02:30"
            })
        );
        assert_eq!(value[1]["signal"], "SELL");
    }

    #[tokio::test]
    async fn test_signals_handler_empty_feed() {
        let feed = SignalFeed::fixed(SignalSet::default());
        let Json(body) = signals(State(feed)).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_home_liveness() {
        assert_eq!(home().await, "FX signal service running");
    }
}

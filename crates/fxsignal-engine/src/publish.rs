//! Polling publisher: drives the fetch → compute → evaluate cycle and
//! owns the shared signal set.

use crate::analyze;
use crate::evaluate::Evaluator;
use chrono::Utc;
use fxsignal_core::error::{SignalError, SignalResult};
use fxsignal_core::traits::QuoteFetcher;
use fxsignal_core::types::{Instrument, Signal, SignalSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// Publisher settings.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Fixed polling interval between cycles
    pub interval: Duration,
    /// Series shorter than this skip evaluation for the cycle
    pub min_bars: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            min_bars: 30,
        }
    }
}

/// Read handle onto the published signal set.
///
/// Cheap to clone; any number of readers may dereference it concurrently
/// with each other and with the publisher. A reader always sees a complete
/// set from some finished cycle (initially the empty set).
#[derive(Clone)]
pub struct SignalFeed {
    inner: Arc<RwLock<Arc<SignalSet>>>,
}

impl SignalFeed {
    /// Snapshot the latest published set.
    pub async fn latest(&self) -> Arc<SignalSet> {
        self.inner.read().await.clone()
    }

    /// Feed over a fixed set with no publisher behind it.
    pub fn fixed(set: SignalSet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(set))),
        }
    }
}

/// Runs the polling loop and atomically replaces the published set at the
/// end of each cycle. Sole writer of the shared handle.
pub struct SignalPublisher<F> {
    fetcher: F,
    evaluator: Evaluator,
    instruments: Vec<Instrument>,
    config: PublisherConfig,
    published: Arc<RwLock<Arc<SignalSet>>>,
}

impl<F: QuoteFetcher> SignalPublisher<F> {
    /// Create a publisher over a fixed instrument set.
    pub fn new(
        fetcher: F,
        evaluator: Evaluator,
        instruments: Vec<Instrument>,
        config: PublisherConfig,
    ) -> Self {
        Self {
            fetcher,
            evaluator,
            instruments,
            config,
            published: Arc::new(RwLock::new(Arc::new(SignalSet::default()))),
        }
    }

    /// Get a read handle for query-side consumers.
    pub fn feed(&self) -> SignalFeed {
        SignalFeed {
            inner: Arc::clone(&self.published),
        }
    }

    /// Run one complete cycle across all instruments and publish the
    /// result. Per-instrument failures are absorbed here: a provider or
    /// data problem for one pair never aborts the cycle for the others.
    pub async fn run_cycle(&self) -> Arc<SignalSet> {
        let mut signals = Vec::new();

        for instrument in &self.instruments {
            match self.process(instrument).await {
                Ok(Some(signal)) => {
                    info!(pair = %signal.pair, direction = signal.direction.as_str(), "signal");
                    signals.push(signal);
                }
                Ok(None) => {}
                Err(SignalError::InsufficientData { required, available }) => {
                    debug!(pair = %instrument, required, available, "series too short, skipping");
                }
                Err(e) => {
                    warn!(pair = %instrument, error = %e, "instrument skipped this cycle");
                }
            }
        }

        let set = Arc::new(SignalSet::new(signals, Utc::now()));
        {
            // Critical section is the pointer swap only.
            let mut guard = self.published.write().await;
            *guard = Arc::clone(&set);
        }
        info!(signals = set.len(), "cycle complete");
        set
    }

    /// Run cycles forever on the configured interval until `shutdown`
    /// flips to true or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("publisher stopping");
                        return;
                    }
                }
            }
        }
    }

    async fn process(&self, instrument: &Instrument) -> SignalResult<Option<Signal>> {
        let series = self.fetcher.fetch(instrument).await?;

        if series.len() < self.config.min_bars {
            return Err(SignalError::InsufficientData {
                required: self.config.min_bars,
                available: series.len(),
            });
        }

        let rows = analyze::compute(&series);
        Ok(self
            .evaluator
            .evaluate(&rows)
            .map(|direction| Signal::new(series.pair, direction, Utc::now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fxsignal_core::error::ProviderError;
    use fxsignal_core::types::{Bar, BarSeries, Direction};
    use std::collections::{HashMap, HashSet};

    struct MockFetcher {
        series: HashMap<String, Vec<Bar>>,
        fail: HashSet<String>,
    }

    #[async_trait]
    impl QuoteFetcher for MockFetcher {
        async fn fetch(&self, instrument: &Instrument) -> Result<BarSeries, ProviderError> {
            let pair = instrument.pair();
            if self.fail.contains(&pair) {
                return Err(ProviderError::MissingSeries(
                    "Time Series FX (1min)".to_string(),
                ));
            }
            self.series
                .get(&pair)
                .map(|bars| BarSeries::from_unordered(pair.clone(), bars.clone()))
                .ok_or_else(|| ProviderError::MissingSeries(pair))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60_000, c, c + 0.5, c - 0.5, c))
            .collect()
    }

    /// 39 bars declining by 1, then one sharp rise: the fast EMA crosses
    /// above the slow EMA exactly at the last bar.
    fn bullish_crossover_closes() -> Vec<f64> {
        let mut closes: Vec<f64> = (0..39).map(|i| 100.0 - i as f64).collect();
        closes.push(142.0);
        closes
    }

    fn flat_closes() -> Vec<f64> {
        vec![100.0; 40]
    }

    /// FX-scale bars: 20 bars declining 2 pips each, then 11 recovering
    /// 2.5 pips each. The fast EMA crosses above the slow EMA at the last
    /// bar with RSI near 61 and ADX near 54, inside the default
    /// thresholds.
    fn recovery_bars() -> Vec<Bar> {
        let mut closes: Vec<f64> = (0..20).map(|i| 1.10 - i as f64 * 0.0002).collect();
        let bottom = *closes.last().unwrap();
        closes.extend((1..=11).map(|i| bottom + i as f64 * 0.00025));

        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60_000, c, c + 0.0005, c - 0.0005, c))
            .collect()
    }

    /// Evaluator with the RSI/ADX gates opened so crossover tests only
    /// exercise the EMA event.
    fn open_gate_evaluator() -> Evaluator {
        Evaluator::new(crate::evaluate::EvaluatorConfig {
            buy_rsi_min: 0.0,
            buy_rsi_max: 100.0,
            sell_rsi_min: 0.0,
            sell_rsi_max: 100.0,
            adx_min: 0.0,
        })
    }

    fn instruments() -> Vec<Instrument> {
        vec![
            Instrument::new("EUR", "USD"),
            Instrument::new("GBP", "USD"),
            Instrument::new("USD", "JPY"),
            Instrument::new("AUD", "USD"),
        ]
    }

    #[tokio::test]
    async fn test_initial_feed_is_empty() {
        let fetcher = MockFetcher {
            series: HashMap::new(),
            fail: HashSet::new(),
        };
        let publisher = SignalPublisher::new(
            fetcher,
            Evaluator::default(),
            instruments(),
            PublisherConfig::default(),
        );

        let set = publisher.feed().latest().await;
        assert!(set.is_empty());
        assert!(set.published_at.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_buy_signal() {
        let mut series = HashMap::new();
        series.insert("EURUSD".to_string(), bars_from_closes(&bullish_crossover_closes()));
        let fetcher = MockFetcher {
            series,
            fail: HashSet::new(),
        };

        let publisher = SignalPublisher::new(
            fetcher,
            open_gate_evaluator(),
            vec![Instrument::new("EUR", "USD")],
            PublisherConfig::default(),
        );

        let set = publisher.run_cycle().await;
        assert_eq!(set.len(), 1);

        let signal = set.get("EURUSD").unwrap();
        assert_eq!(signal.direction, Direction::Buy);
        assert_eq!(signal.expiry, "1 Minute");

        // Readers see the same set through the feed.
        let latest = publisher.feed().latest().await;
        assert_eq!(latest.len(), 1);
        assert!(latest.published_at.is_some());
    }

    #[tokio::test]
    async fn test_default_thresholds_end_to_end_buy() {
        // Decline-then-recover series through the unmodified rule: the
        // crossover bar's RSI sits in the 50-70 band and ADX exceeds 20.
        let mut series = HashMap::new();
        series.insert("EURUSD".to_string(), recovery_bars());
        let fetcher = MockFetcher {
            series,
            fail: HashSet::new(),
        };

        let publisher = SignalPublisher::new(
            fetcher,
            Evaluator::default(),
            vec![Instrument::new("EUR", "USD")],
            PublisherConfig::default(),
        );

        let set = publisher.run_cycle().await;
        let signal = set.get("EURUSD").expect("default rule fires on recovery");
        assert_eq!(signal.direction, Direction::Buy);
        assert_eq!(signal.expiry, "1 Minute");
    }

    #[tokio::test]
    async fn test_cycle_isolation() {
        // GBPUSD's provider response has no series key, USDJPY is too
        // short; EURUSD and AUDUSD still complete the cycle.
        let mut series = HashMap::new();
        series.insert("EURUSD".to_string(), bars_from_closes(&bullish_crossover_closes()));
        series.insert("USDJPY".to_string(), bars_from_closes(&[150.0; 10]));
        series.insert("AUDUSD".to_string(), bars_from_closes(&flat_closes()));
        let fetcher = MockFetcher {
            series,
            fail: HashSet::from(["GBPUSD".to_string()]),
        };

        let publisher = SignalPublisher::new(
            fetcher,
            open_gate_evaluator(),
            instruments(),
            PublisherConfig::default(),
        );

        let set = publisher.run_cycle().await;

        // Only EURUSD fires; GBPUSD and USDJPY have no entry; AUDUSD was
        // evaluated but its flat series has no crossover.
        assert_eq!(set.len(), 1);
        assert!(set.get("EURUSD").is_some());
        assert!(set.get("GBPUSD").is_none());
        assert!(set.get("USDJPY").is_none());
        assert!(set.get("AUDUSD").is_none());
    }

    #[tokio::test]
    async fn test_publish_replaces_wholesale() {
        let mut series = HashMap::new();
        series.insert("EURUSD".to_string(), bars_from_closes(&bullish_crossover_closes()));
        let fetcher = MockFetcher {
            series,
            fail: HashSet::new(),
        };

        let publisher = SignalPublisher::new(
            fetcher,
            open_gate_evaluator(),
            vec![Instrument::new("EUR", "USD")],
            PublisherConfig::default(),
        );
        let feed = publisher.feed();

        let before = feed.latest().await;
        let first = publisher.run_cycle().await;
        let second = publisher.run_cycle().await;

        // The pre-cycle snapshot is untouched by later publishes, and each
        // cycle installs a fresh set rather than mutating the old one.
        assert!(before.is_empty());
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&second, &feed.latest().await));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let fetcher = MockFetcher {
            series: HashMap::new(),
            fail: HashSet::new(),
        };
        let publisher = SignalPublisher::new(
            fetcher,
            Evaluator::default(),
            vec![],
            PublisherConfig {
                interval: Duration::from_millis(5),
                min_bars: 30,
            },
        );

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move { publisher.run(rx).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}

//! Serial event queue driving the strategy
//!
//! One consumer task owns all strategy state. Ticks and the daily reset
//! arrive on the same channel, so a reset can never interleave with a tick
//! in flight. The engine also buckets minute bars into hourly bars and hands
//! each completed hour to the trader before the tick that opened the next
//! one.

use chrono::{Duration, Utc};
use tokio::sync::mpsc;
use tracing::info;

use crate::execution::OrderGateway;
use crate::strategy::Trader;
use crate::types::Bar;

/// Everything the strategy reacts to
#[derive(Debug, Clone)]
pub enum Event {
    /// Minute bar from the feed
    Tick(Bar),
    /// Scheduled 00:00 UTC boundary
    DailyReset,
}

/// Buckets minute bars into hourly bars, emitting each hour on completion
#[derive(Debug, Default)]
pub struct HourlyConsolidator {
    current: Option<Bar>,
}

impl HourlyConsolidator {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Feed a minute bar; returns the completed hourly bar when a new hour
    /// starts.
    pub fn update(&mut self, bar: &Bar) -> Option<Bar> {
        let bucket = bar.timestamp.timestamp() / 3600;
        match &mut self.current {
            Some(cur) if cur.timestamp.timestamp() / 3600 == bucket => {
                cur.high = cur.high.max(bar.high);
                cur.low = cur.low.min(bar.low);
                cur.close = bar.close;
                None
            }
            Some(cur) => {
                let completed = cur.clone();
                self.current = Some(bar.clone());
                Some(completed)
            }
            None => {
                self.current = Some(bar.clone());
                None
            }
        }
    }
}

pub struct Engine<G: OrderGateway> {
    trader: Trader<G>,
    consolidator: HourlyConsolidator,
}

impl<G: OrderGateway> Engine<G> {
    pub fn new(trader: Trader<G>) -> Self {
        Self {
            trader,
            consolidator: HourlyConsolidator::new(),
        }
    }

    /// Process one event to completion
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Tick(bar) => {
                if let Some(hour_bar) = self.consolidator.update(&bar) {
                    self.trader.on_hour_close(&hour_bar);
                }
                self.trader.on_tick(&bar);
            }
            Event::DailyReset => self.trader.reset_daily(),
        }
    }

    /// Consume the queue until the feed closes, then hand the trader back
    pub async fn run(mut self, mut rx: mpsc::Receiver<Event>) -> Trader<G> {
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        info!("event stream closed");
        self.trader
    }

    pub fn trader(&self) -> &Trader<G> {
        &self.trader
    }
}

/// Schedule `Event::DailyReset` at every 00:00 UTC through the shared queue
pub fn spawn_daily_reset(tx: mpsc::Sender<Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next_midnight = now
                .date_naive()
                .succ_opt()
                .unwrap_or_else(|| now.date_naive())
                .and_hms_opt(0, 0, 0)
                .expect("midnight is a valid time")
                .and_utc();
            let wait = (next_midnight - now)
                .max(Duration::zero())
                .to_std()
                .unwrap_or_default();
            tokio::time::sleep(wait).await;
            if tx.send(Event::DailyReset).await.is_err() {
                break;
            }
        }
    })
}

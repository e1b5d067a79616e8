//! Average True Range (ATR), streaming form.
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! Wilder smoothing (alpha = 1/period), seeded with the mean of the first
//! `period` true ranges. The first bar only establishes the previous close,
//! so readiness requires period + 1 bars.

use crate::types::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    prev_close: Option<f64>,
    seed_sum: f64,
    seed_count: usize,
    current: Option<f64>,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            prev_close: None,
            seed_sum: 0.0,
            seed_count: 0,
            current: None,
        }
    }

    pub fn update(&mut self, bar: &Bar) {
        let Some(pc) = self.prev_close else {
            self.prev_close = Some(bar.close);
            return;
        };
        let tr = (bar.high - bar.low)
            .max((bar.high - pc).abs())
            .max((bar.low - pc).abs());
        self.prev_close = Some(bar.close);

        match self.current {
            Some(prev) => {
                let alpha = 1.0 / self.period as f64;
                self.current = Some(alpha * tr + (1.0 - alpha) * prev);
            }
            None => {
                self.seed_sum += tr;
                self.seed_count += 1;
                if self.seed_count == self.period {
                    self.current = Some(self.seed_sum / self.period as f64);
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    pub fn value(&self) -> Option<f64> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Bar {
                symbol: "TEST".to_string(),
                timestamp: base + Duration::hours(i as i64),
                open,
                high,
                low,
                close,
            })
            .collect()
    }

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_atr_period_3() {
        // True ranges from the second bar on: 8, 9, 6, 6
        // Seed: mean(8, 9, 6) = 23/3
        // Next: (1/3)*6 + (2/3)*(23/3) = 64/9
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
            (101.0, 106.0, 100.0, 105.0),
        ]);
        let mut atr = Atr::new(3);
        for bar in &bars[..4] {
            atr.update(bar);
        }
        assert_approx(atr.value().unwrap(), 23.0 / 3.0);
        atr.update(&bars[4]);
        assert_approx(atr.value().unwrap(), 64.0 / 9.0);
    }

    #[test]
    fn test_atr_gap_uses_prev_close() {
        // Gap up: prev close 100, bar 110-115-108 -> TR = |115-100| = 15
        let bars = make_ohlc_bars(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0),
        ]);
        let mut atr = Atr::new(1);
        atr.update(&bars[0]);
        assert!(!atr.is_ready());
        atr.update(&bars[1]);
        assert_approx(atr.value().unwrap(), 15.0);
    }

    #[test]
    fn test_atr_needs_period_plus_one_bars() {
        let bars = make_ohlc_bars(&[
            (1.0, 2.0, 0.5, 1.5),
            (1.5, 2.5, 1.0, 2.0),
            (2.0, 3.0, 1.5, 2.5),
        ]);
        let mut atr = Atr::new(2);
        atr.update(&bars[0]);
        atr.update(&bars[1]);
        assert!(!atr.is_ready());
        atr.update(&bars[2]);
        assert!(atr.is_ready());
    }
}

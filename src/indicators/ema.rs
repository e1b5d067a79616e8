//! Exponential Moving Average (EMA), streaming form.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1]
//! Seed: SMA of the first `period` inputs. Not ready until the seed forms.

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    alpha: f64,
    seed_sum: f64,
    seen: usize,
    current: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            alpha: 2.0 / (period as f64 + 1.0),
            seed_sum: 0.0,
            seen: 0,
            current: None,
        }
    }

    pub fn update(&mut self, value: f64) {
        match self.current {
            Some(prev) => {
                self.current = Some(self.alpha * value + (1.0 - self.alpha) * prev);
            }
            None => {
                self.seed_sum += value;
                self.seen += 1;
                if self.seen == self.period {
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

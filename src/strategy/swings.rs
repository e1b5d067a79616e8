//! Rolling swing-point buffers used as a coarse secondary trend read
//!
//! Never the deciding entry filter on its own; tracked for structure context
//! that outlives the daily reset.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingHint {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone)]
pub struct SwingTracker {
    highs: VecDeque<f64>,
    lows: VecDeque<f64>,
    capacity: usize,
    last_hint: Option<SwingHint>,
}

impl SwingTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            highs: VecDeque::with_capacity(capacity + 1),
            lows: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_hint: None,
        }
    }

    /// Feed one tick. The high and low branches run independently: a single
    /// tick may fire either, both, or neither. Returns the hint from
    /// whichever branch fired last.
    pub fn observe(&mut self, price: f64) -> Option<SwingHint> {
        let cur_max = self.highs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if self.highs.is_empty() || price > cur_max {
            self.highs.push_back(price);
            if self.highs.len() > self.capacity {
                self.highs.pop_front();
            }
            self.last_hint = Some(SwingHint::Bullish);
        }

        let cur_min = self.lows.iter().cloned().fold(f64::INFINITY, f64::min);
        if self.lows.is_empty() || price < cur_min {
            self.lows.push_back(price);
            if self.lows.len() > self.capacity {
                self.lows.pop_front();
            }
            self.last_hint = Some(SwingHint::Bearish);
        }

        self.last_hint
    }

    pub fn hint(&self) -> Option<SwingHint> {
        self.last_hint
    }

    pub fn highs(&self) -> &VecDeque<f64> {
        &self.highs
    }

    pub fn lows(&self) -> &VecDeque<f64> {
        &self.lows
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Animation rate in algorithm steps per second.
///
/// Drivers redraw at most [`Speed::FRAME_RATE`] times a second, so rates above that are
/// reached by running several steps per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Speed(u32);

impl Speed {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 3600;
    pub const FRAME_RATE: u32 = 60;

    pub fn new(rate: u32) -> Self {
        Speed(rate.max(1))
    }

    pub fn rate(self) -> u32 {
        self.0
    }

    /// +2 up to the frame rate, doubling above it, capped once past [`Speed::MAX`]
    pub fn faster(self) -> Self {
        match self.0 {
            r if r < Self::FRAME_RATE => Speed(r + 2),
            r if r < Self::MAX => Speed(r * 2),
            r => Speed(r),
        }
    }

    /// -2 down to [`Speed::MIN`], halving above the frame rate
    pub fn slower(self) -> Self {
        match self.0 {
            r if r <= Self::MIN => Speed(r),
            r if r <= Self::FRAME_RATE => Speed(r - 2),
            r => Speed(r / 2),
        }
    }

    pub fn steps_per_tick(self) -> usize {
        self.0.div_ceil(Self::FRAME_RATE).max(1) as usize
    }

    pub fn tick_interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / self.0.min(Self::FRAME_RATE) as f64)
    }
}

impl From<u32> for Speed {
    fn from(rate: u32) -> Self {
        Speed::new(rate)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(15)
    }
}

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Integer 2D coordinates, also used as the cell reference throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    /// Componentwise difference, `None` if either axis overflows
    pub fn checked_sub(self, other: Dims) -> Option<Dims> {
        Some(Dims(
            self.0.checked_sub(other.0)?,
            self.1.checked_sub(other.1)?,
        ))
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

//! Piecewise-linear monotonic scale (domain breakpoints → range breakpoints).
//!
//! - Domain is strictly increasing; range is strictly monotonic in one
//!   direction (reversed viewports are allowed).
//! - Evaluation outside the domain extrapolates along the first/last segment.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::math::{bracket, lerp};

/// Deserialized input is cleaned by `from_breakpoints`; unusable breakpoint
/// lists are rejected instead of producing a scale that cannot be evaluated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Breakpoints")]
pub struct LinearScale {
    domain: Vec<f64>,
    range: Vec<f64>,
}

#[derive(Deserialize)]
struct Breakpoints {
    domain: Vec<f64>,
    range: Vec<f64>,
}

impl TryFrom<Breakpoints> for LinearScale {
    type Error = Error;

    fn try_from(b: Breakpoints) -> Result<Self, Error> {
        if b.domain.len() != b.range.len() {
            return Err(Error::InvalidScale {
                reason: "domain and range differ in length",
            });
        }
        LinearScale::from_breakpoints(b.domain, b.range).ok_or(Error::InvalidScale {
            reason: "needs two finite, strictly advancing breakpoints",
        })
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::identity()
    }
}

impl LinearScale {
    /// `[0, 1] → [0, 1]`.
    pub fn identity() -> Self {
        Self {
            domain: vec![0.0, 1.0],
            range: vec![0.0, 1.0],
        }
    }

    /// Two-point scale. Falls back to a unit-slope translation through
    /// `(domain[0], range[0])` if the domain or range collapses.
    pub fn linear(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self::from_breakpoints(domain.to_vec(), range.to_vec())
            .unwrap_or_else(|| Self::translation(domain[0], range[0]))
    }

    /// Unit-slope map sending `x` to `y`.
    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            domain: vec![x, x + 1.0],
            range: vec![y, y + 1.0],
        }
    }

    /// Build from paired breakpoints. Pairs are sorted by domain; a pair is
    /// dropped when its domain or range does not strictly advance past the
    /// last kept pair (coincident positions, inverted order). Returns `None`
    /// if fewer than two pairs survive or any value is non-finite.
    pub fn from_breakpoints(domain: Vec<f64>, range: Vec<f64>) -> Option<Self> {
        if domain.len() != range.len() || domain.len() < 2 {
            return None;
        }
        if domain.iter().chain(range.iter()).any(|v| !v.is_finite()) {
            return None;
        }
        let mut pairs: Vec<(f64, f64)> = domain.into_iter().zip(range).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        // Direction is taken from the overall span of the range.
        let first = pairs[0].1;
        let last = pairs[pairs.len() - 1].1;
        let ascending = last >= first;

        let mut d: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut r: Vec<f64> = Vec::with_capacity(pairs.len());
        for (x, y) in pairs {
            if let (Some(&px), Some(&py)) = (d.last(), r.last()) {
                let advances = if ascending { y > py } else { y < py };
                if x <= px || !advances {
                    continue;
                }
            }
            d.push(x);
            r.push(y);
        }
        if d.len() < 2 {
            return None;
        }
        Some(Self { domain: d, range: r })
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[f64] {
        &self.range
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// First and last range values.
    pub fn range_extent(&self) -> [f64; 2] {
        [self.range[0], self.range[self.range.len() - 1]]
    }

    fn is_ascending(&self) -> bool {
        self.range[self.range.len() - 1] >= self.range[0]
    }

    /// Forward evaluation (domain → range).
    pub fn apply(&self, x: f64) -> f64 {
        let i = bracket(&self.domain, x);
        lerp(
            self.domain[i - 1],
            self.domain[i],
            self.range[i - 1],
            self.range[i],
            x,
        )
    }

    /// Inverse evaluation (range → domain).
    pub fn invert(&self, y: f64) -> f64 {
        let i = if self.is_ascending() {
            bracket(&self.range, y)
        } else {
            let k = self.range.partition_point(|&v| v >= y);
            k.clamp(1, self.range.len() - 1)
        };
        lerp(
            self.range[i - 1],
            self.range[i],
            self.domain[i - 1],
            self.domain[i],
            y,
        )
    }
}

use serde::{Deserialize, Serialize};

/// A point (or displacement) on the continuous 2D simulation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn sub(self, other: Position) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(self, other: Position) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Clamp into `[0, width] x [0, height]`.
    pub fn clamp_to(self, width: f64, height: f64) -> Self {
        Self::new(self.x.clamp(0.0, width), self.y.clamp(0.0, height))
    }

    /// Move at most `step` toward `target`. Returns `self` unchanged when
    /// already within `epsilon`.
    pub fn step_toward(self, target: Position, step: f64, epsilon: f64) -> Self {
        let delta = target.sub(self);
        let dist = delta.length();
        if dist <= epsilon {
            return self;
        }
        if dist <= step {
            return target;
        }
        self.add(delta.scale(step / dist))
    }
}

/// Arithmetic mean of a set of points. `None` when empty.
pub fn centroid(points: impl IntoIterator<Item = Position>) -> Option<Position> {
    let mut sum = Position::default();
    let mut count = 0usize;
    for p in points {
        sum = sum.add(p);
        count += 1;
    }
    (count > 0).then(|| sum.scale(1.0 / count as f64))
}

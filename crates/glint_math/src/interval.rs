/// A closed range of `f32` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Create an interval centered on `center` reaching `half` to each side.
    pub fn around(center: f32, half: f32) -> Self {
        Self::new(center - half, center + half)
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Expands the interval by `padding` on each side.
    pub fn pad(&self, padding: f32) -> Interval {
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Maps `x` linearly so that `min` becomes 0 and `min + extent` becomes 1.
    pub fn normalized(&self, x: f32, extent: f32) -> f32 {
        (x - self.min) / extent
    }
}

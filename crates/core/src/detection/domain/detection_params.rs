use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("scale factor must be greater than 1.0 and at most 2.0, got {0}")]
    ScaleFactor(f64),
    #[error("minimum neighbors must be at least 1, got {0}")]
    MinNeighbors(u32),
    #[error("minimum face size must be at least 1 pixel, got {0}")]
    MinSize(u32),
}

/// Declared range, step and default of one user-adjustable parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamBounds<T> {
    pub min: T,
    pub max: T,
    pub step: T,
    pub default: T,
}

impl<T: PartialOrd + Copy> ParamBounds<T> {
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl ParamBounds<f64> {
    /// Rounds to the step grid and clamps. NaN falls back to the default.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        self.clamp((value / self.step).round() * self.step)
    }

    pub fn step_up(&self, value: f64) -> f64 {
        self.snap(value + self.step)
    }

    pub fn step_down(&self, value: f64) -> f64 {
        self.snap(value - self.step)
    }
}

impl ParamBounds<u32> {
    pub fn step_up(&self, value: u32) -> u32 {
        self.clamp(value.saturating_add(self.step))
    }

    pub fn step_down(&self, value: u32) -> u32 {
        self.clamp(value.saturating_sub(self.step))
    }
}

pub const SCALE_FACTOR_BOUNDS: ParamBounds<f64> = ParamBounds {
    min: 1.01,
    max: 2.0,
    step: 0.01,
    default: 1.1,
};

pub const MIN_NEIGHBORS_BOUNDS: ParamBounds<u32> = ParamBounds {
    min: 1,
    max: 20,
    step: 1,
    default: 5,
};

pub const MIN_SIZE_BOUNDS: ParamBounds<u32> = ParamBounds {
    min: 10,
    max: 500,
    step: 1,
    default: 30,
};

/// Multi-scale scan parameters forwarded to the cascade classifier.
///
/// `min_size` is the edge of the smallest square window scanned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    pub scale_factor: f64,
    pub min_neighbors: u32,
    pub min_size: u32,
}

impl DetectionParams {
    pub fn new(scale_factor: f64, min_neighbors: u32, min_size: u32) -> Result<Self, ParamError> {
        let params = Self {
            scale_factor,
            min_neighbors,
            min_size,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the detector contract, which is looser than the UI bounds.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.scale_factor > 1.0 && self.scale_factor <= 2.0) {
            return Err(ParamError::ScaleFactor(self.scale_factor));
        }
        if self.min_neighbors < 1 {
            return Err(ParamError::MinNeighbors(self.min_neighbors));
        }
        if self.min_size < 1 {
            return Err(ParamError::MinSize(self.min_size));
        }
        Ok(())
    }

    /// Copy with every value pulled into its UI bounds.
    pub fn clamped(&self) -> Self {
        Self {
            scale_factor: SCALE_FACTOR_BOUNDS.snap(self.scale_factor),
            min_neighbors: MIN_NEIGHBORS_BOUNDS.clamp(self.min_neighbors),
            min_size: MIN_SIZE_BOUNDS.clamp(self.min_size),
        }
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: SCALE_FACTOR_BOUNDS.default,
            min_neighbors: MIN_NEIGHBORS_BOUNDS.default,
            min_size: MIN_SIZE_BOUNDS.default,
        }
    }
}

impl std::fmt::Display for DetectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scaleFactor={:.2} minNeighbors={} minSize={}x{}",
            self.scale_factor, self.min_neighbors, self.min_size, self.min_size
        )
    }
}

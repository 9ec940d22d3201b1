use crate::{error::CoverError, feature::InputGeometry, region::CoverRegion};
use geojson::Feature;
use log::{debug, info};
use s2::{cellid::CellID, region::RegionCoverer};

/// Upper bound on the number of cells in a single covering.
pub const MAX_CELLS: usize = 100_000;

/// Finest S2 cell level.
pub const MAX_LEVEL: u8 = 30;

/// An inclusive window of S2 cell levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelRange {
    min: u8,
    max: u8,
}

impl LevelRange {
    pub fn new(min: u8, max: u8) -> Result<Self, CoverError> {
        if max > MAX_LEVEL {
            return Err(CoverError::Config(format!(
                "max level {max} exceeds {MAX_LEVEL}"
            )));
        }
        if min > max {
            return Err(CoverError::Config(format!(
                "min level {min} is greater than max level {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, level: u64) -> bool {
        (u64::from(self.min)..=u64::from(self.max)).contains(&level)
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self {
            min: 1,
            max: MAX_LEVEL,
        }
    }
}

/// Computes S2 coverings within a level window.
#[derive(Clone, Copy, Debug, Default)]
pub struct Coverer {
    pub levels: LevelRange,

    /// Only emit cells entirely inside the region.
    pub interior: bool,
}

impl Coverer {
    pub fn new(levels: LevelRange, interior: bool) -> Self {
        Self { levels, interior }
    }

    pub fn cover(&self, region: &CoverRegion) -> Vec<CellID> {
        let rc = RegionCoverer {
            min_level: self.levels.min,
            max_level: self.levels.max,
            level_mod: 1,
            max_cells: MAX_CELLS,
        };
        let cells = if self.interior {
            rc.interior_covering(region)
        } else {
            rc.covering(region)
        };
        cells.0
    }

    /// Covers every feature in `features`, concatenating the results in
    /// input order.
    pub fn cover_features(&self, features: &[Feature]) -> Result<Vec<CellID>, CoverError> {
        let mut cells = Vec::new();
        for (index, feature) in features.iter().enumerate() {
            let geometry = InputGeometry::from_feature(index, feature)?;
            let region = CoverRegion::from(&geometry);
            let covering = self.cover(&region);
            debug!("feature {index}: {} cells", covering.len());
            cells.extend(covering);
        }
        info!(
            "covered {} features with {} cells (levels {}..={}, interior: {})",
            features.len(),
            cells.len(),
            self.levels.min,
            self.levels.max,
            self.interior
        );
        Ok(cells)
    }
}

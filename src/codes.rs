use crate::error::{ExtractError, Result};
use log::{debug, info};
use ndarray::ArrayView2;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// CORINE raster grid codes and the standard three-digit land-cover code each one stands for.
///
/// Grid codes 1..=44 are the legend classes. 0, 48, 49, 50 and 255 are the
/// outside-coverage, nodata and unclassified entries some vintages carry.
pub const GRID_CODE_TABLE: [(i32, i32); 49] = [
    (0, 999),
    (1, 111),
    (2, 112),
    (3, 121),
    (4, 122),
    (5, 123),
    (6, 124),
    (7, 131),
    (8, 132),
    (9, 133),
    (10, 141),
    (11, 142),
    (12, 211),
    (13, 212),
    (14, 213),
    (15, 221),
    (16, 222),
    (17, 223),
    (18, 231),
    (19, 241),
    (20, 242),
    (21, 243),
    (22, 244),
    (23, 311),
    (24, 312),
    (25, 313),
    (26, 321),
    (27, 322),
    (28, 323),
    (29, 324),
    (30, 331),
    (31, 332),
    (32, 333),
    (33, 334),
    (34, 335),
    (35, 411),
    (36, 412),
    (37, 421),
    (38, 422),
    (39, 423),
    (40, 511),
    (41, 512),
    (42, 521),
    (43, 522),
    (44, 523),
    (48, 999),
    (49, 990),
    (50, 995),
    (255, 999),
];

/// Values a direct-code raster may hold.
pub const DIRECT_CODE_DOMAIN: RangeInclusive<i32> = 100..=999;

/// Standard land-cover code for a grid code, if the grid code is in the table
pub fn standard_code(grid_code: i32) -> Option<i32> {
    GRID_CODE_TABLE
        .binary_search_by_key(&grid_code, |&(key, _)| key)
        .ok()
        .map(|idx| GRID_CODE_TABLE[idx].1)
}

pub fn is_grid_code(value: i32) -> bool {
    standard_code(value).is_some()
}

/// Canonical class of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandClass {
    Urban,
    NonUrban,
    Nodata,
}

/// Inclusive range of raw values, always expressed in grid-code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRange {
    pub min: i32,
    pub max: i32,
}

impl ClassRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn overlaps(&self, other: &ClassRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    fn to_inclusive(self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Translate both bounds through the grid-code table.
    fn to_direct_code(self) -> Result<RangeInclusive<i32>> {
        let lookup = |bound: i32| {
            standard_code(bound).ok_or_else(|| {
                ExtractError::Configuration(format!("class bound {} is not a known grid code", bound))
            })
        };
        Ok(lookup(self.min)?..=lookup(self.max)?)
    }
}

impl std::str::FromStr for ClassRange {
    type Err = ExtractError;

    /// Parses `"MIN,MAX"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ExtractError::Configuration(format!("invalid class range '{}', expected MIN,MAX", s));
        let (min, max) = s.split_once(',').ok_or_else(invalid)?;
        let min = min.trim().parse::<i32>().map_err(|_| invalid())?;
        let max = max.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(min, max))
    }
}

/// Validated urban/non-urban range pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRanges {
    urban: ClassRange,
    non_urban: ClassRange,
}

impl ClassRanges {
    pub fn new(urban: ClassRange, non_urban: ClassRange) -> Result<Self> {
        for (name, range) in [("urban", urban), ("non-urban", non_urban)] {
            if range.is_empty() {
                return Err(ExtractError::Configuration(format!(
                    "{} range [{}, {}] is empty",
                    name, range.min, range.max
                )));
            }
            for bound in [range.min, range.max] {
                if !is_grid_code(bound) {
                    return Err(ExtractError::Configuration(format!(
                        "{} range bound {} is not a known grid code",
                        name, bound
                    )));
                }
            }
        }

        if urban.overlaps(&non_urban) {
            return Err(ExtractError::Configuration(format!(
                "urban range [{}, {}] overlaps non-urban range [{}, {}]",
                urban.min, urban.max, non_urban.min, non_urban.max
            )));
        }

        Ok(Self { urban, non_urban })
    }

    pub fn urban(&self) -> ClassRange {
        self.urban
    }

    pub fn non_urban(&self) -> ClassRange {
        self.non_urban
    }
}

impl Default for ClassRanges {
    fn default() -> Self {
        Self {
            urban: ClassRange::new(1, 11),
            non_urban: ClassRange::new(12, 34),
        }
    }
}

/// Raw value encoding of a land-cover raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Small integer grid codes that need a table lookup.
    GridCode,
    /// Values equal to standard land-cover codes.
    DirectCode,
}

impl Codec {
    /// Decide the encoding of a raster from the distinct values it holds, ignoring nodata cells.
    pub fn detect(data: ArrayView2<i32>, raw_nodata: Option<i32>) -> Result<Self> {
        let distinct: BTreeSet<i32> = data
            .iter()
            .copied()
            .filter(|&value| Some(value) != raw_nodata)
            .collect();
        debug!("Raster holds {} distinct raw values", distinct.len());

        if distinct.iter().all(|&value| is_grid_code(value)) {
            info!("Detected grid-code encoding");
            return Ok(Codec::GridCode);
        }

        if let Some(&value) = distinct.iter().find(|&&value| !DIRECT_CODE_DOMAIN.contains(&value)) {
            return Err(ExtractError::UnsupportedCodec(value));
        }

        info!("Detected direct-code encoding");
        Ok(Codec::DirectCode)
    }

    /// Express the configured ranges in this codec's value space.
    pub fn resolve(&self, ranges: &ClassRanges) -> Result<ResolvedRanges> {
        let resolved = match self {
            Codec::GridCode => ResolvedRanges {
                urban: ranges.urban.to_inclusive(),
                non_urban: ranges.non_urban.to_inclusive(),
            },
            Codec::DirectCode => ResolvedRanges {
                urban: ranges.urban.to_direct_code()?,
                non_urban: ranges.non_urban.to_direct_code()?,
            },
        };
        debug!(
            "{:?} ranges: urban={:?}, non-urban={:?}",
            self, resolved.urban, resolved.non_urban
        );
        resolved.validate()?;
        Ok(resolved)
    }
}

/// Class ranges in the raw value space of one raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRanges {
    pub urban: RangeInclusive<i32>,
    pub non_urban: RangeInclusive<i32>,
}

impl ResolvedRanges {
    /// The grid-code table is not monotone past the legend codes, so a pair that
    /// is valid in grid-code space can still collapse or collide once translated.
    fn validate(&self) -> Result<()> {
        for (name, range) in [("urban", &self.urban), ("non-urban", &self.non_urban)] {
            if range.is_empty() {
                return Err(ExtractError::Configuration(format!(
                    "{} range resolves to empty {:?}",
                    name, range
                )));
            }
        }
        if self.urban.start() <= self.non_urban.end() && self.non_urban.start() <= self.urban.end() {
            return Err(ExtractError::Configuration(format!(
                "resolved urban range {:?} overlaps non-urban range {:?}",
                self.urban, self.non_urban
            )));
        }
        Ok(())
    }

    pub fn class_of(&self, value: i32, raw_nodata: Option<i32>) -> LandClass {
        if Some(value) == raw_nodata {
            LandClass::Nodata
        } else if self.urban.contains(&value) {
            LandClass::Urban
        } else if self.non_urban.contains(&value) {
            LandClass::NonUrban
        } else {
            LandClass::Nodata
        }
    }
}

use crate::codes::{Codec, LandClass, ResolvedRanges};
use crate::config::ExtractConfig;
use crate::error::Result;
use log::{debug, info};
use ndarray::{Array2, ArrayView2, Zip};

/// Canonical classification of a raw raster.
#[derive(Debug, Clone)]
pub struct Classified {
    pub classes: Array2<LandClass>,
    pub codec: Codec,
}

impl Classified {
    /// Output codes for every cell.
    pub fn to_codes(&self, config: &ExtractConfig) -> Array2<u8> {
        let codes = config.output_codes;
        Zip::from(&self.classes).par_map_collect(|&class| codes.code_for(class))
    }

    pub fn counts(&self) -> ClassCounts {
        ClassCounts::from_classes(self.classes.view())
    }
}

/// Cell count per canonical class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub urban: usize,
    pub non_urban: usize,
    pub nodata: usize,
}

impl ClassCounts {
    pub fn from_classes(classes: ArrayView2<LandClass>) -> Self {
        classes.iter().fold(ClassCounts::default(), |mut counts, class| {
            match class {
                LandClass::Urban => counts.urban += 1,
                LandClass::NonUrban => counts.non_urban += 1,
                LandClass::Nodata => counts.nodata += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.urban + self.non_urban + self.nodata
    }
}

fn map_classes(data: ArrayView2<i32>, ranges: &ResolvedRanges, raw_nodata: i32) -> Array2<LandClass> {
    Zip::from(&data).par_map_collect(|&value| ranges.class_of(value, Some(raw_nodata)))
}

/// Classify every cell of `data` into urban, non-urban or nodata.
///
/// The codec is detected once for the whole grid; `raster_nodata` is the
/// raster's own nodata value and may be superseded by the configuration.
pub fn classify(data: ArrayView2<i32>, raster_nodata: Option<i32>, config: &ExtractConfig) -> Result<Classified> {
    let raw_nodata = config.raw_nodata(raster_nodata);
    debug!("Using raw nodata value: {}", raw_nodata);

    let codec = Codec::detect(data, Some(raw_nodata))?;
    let ranges = codec.resolve(&config.ranges)?;
    let classes = map_classes(data, &ranges, raw_nodata);

    let classified = Classified { classes, codec };
    let counts = classified.counts();
    info!(
        "Classified {} cells: {} urban, {} non-urban, {} nodata",
        counts.total(),
        counts.urban,
        counts.non_urban,
        counts.nodata
    );
    Ok(classified)
}

/// Like [`classify`], but every cell that is not of `class_of_interest` becomes nodata.
pub fn classify_restricted(
    data: ArrayView2<i32>,
    raster_nodata: Option<i32>,
    config: &ExtractConfig,
    class_of_interest: LandClass,
) -> Result<Classified> {
    let mut classified = classify(data, raster_nodata, config)?;
    classified.classes.par_mapv_inplace(|class| {
        if class == class_of_interest {
            class
        } else {
            LandClass::Nodata
        }
    });
    debug!("Restricted classification to {:?}", class_of_interest);
    Ok(classified)
}

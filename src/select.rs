use crate::error::{ensure_same_shape, Result};
use log::debug;
use ndarray::{Array2, ArrayView2, Zip};
use std::collections::BTreeSet;

/// Ids of the labelled patches with at least one cell under `boundary`.
///
/// A single overlapping cell is enough to select the whole patch.
pub fn select_patches(labels: ArrayView2<u32>, boundary: ArrayView2<bool>) -> Result<BTreeSet<u32>> {
    ensure_same_shape(labels.dim(), boundary.dim())?;

    let mut selected = BTreeSet::new();
    Zip::from(&labels).and(&boundary).for_each(|&label, &inside| {
        if inside && label != 0 {
            selected.insert(label);
        }
    });

    debug!("{} patches intersect the boundary", selected.len());
    Ok(selected)
}

/// Mask of every cell whose label is in `ids`.
pub fn patch_mask(labels: ArrayView2<u32>, ids: &BTreeSet<u32>) -> Array2<bool> {
    labels.mapv(|label| label != 0 && ids.contains(&label))
}

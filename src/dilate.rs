use crate::error::{ExtractError, Result};
use log::{debug, info, warn};
use ndarray::{s, Array2, ArrayView2, Zip};

use crate::label::NEIGHBORS_8;

/// Number of one-cell dilation passes covering `buffer_distance` at `resolution`.
///
/// Rounds to the nearest whole cell and never returns less than 1, even for a
/// zero or negative distance.
pub fn buffer_iterations(buffer_distance: f64, resolution: f64) -> Result<usize> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(ExtractError::Configuration(format!(
            "resolution must be a positive number, got {}",
            resolution
        )));
    }

    // FIXME: non-positive distances still dilate by one ring
    if buffer_distance <= 0.0 {
        warn!(
            "Buffer distance {} is not positive, dilating by one cell anyway",
            buffer_distance
        );
    }

    let cells = (buffer_distance / resolution).round();
    let iterations = if cells.is_nan() || cells < 1.0 { 1 } else { cells as usize };
    info!(
        "Buffer: {} units = {} cells (resolution: {:.6})",
        buffer_distance, iterations, resolution
    );
    Ok(iterations)
}

/// Source start, destination start and length of a one-dimensional shift.
fn shift_range(offset: isize, size: usize) -> (usize, usize, usize) {
    let shift = offset.unsigned_abs().min(size);
    if offset >= 0 {
        (0, shift, size - shift)
    } else {
        (shift, 0, size - shift)
    }
}

/// Grow the true region of `mask` by `iterations` rings of 8-connected neighbors.
///
/// Cells outside the grid count as false. Stops early once a pass adds nothing.
pub fn dilate(mask: ArrayView2<bool>, iterations: usize) -> Array2<bool> {
    let (nrows, ncols) = mask.dim();
    let mut current = mask.to_owned();

    for pass in 0..iterations {
        let mut grown = current.clone();

        for &(dr, dc) in NEIGHBORS_8.iter() {
            let (src_r, dst_r, h) = shift_range(dr, nrows);
            let (src_c, dst_c, w) = shift_range(dc, ncols);
            if h == 0 || w == 0 {
                continue;
            }

            Zip::from(grown.slice_mut(s![dst_r..dst_r + h, dst_c..dst_c + w]))
                .and(current.slice(s![src_r..src_r + h, src_c..src_c + w]))
                .for_each(|dst, &src| *dst |= src);
        }

        if grown == current {
            debug!("Dilation converged after {} of {} passes", pass, iterations);
            break;
        }
        current = grown;
    }

    current
}

/// Dilate `mask` by the number of cells `buffer_distance` covers at `resolution`.
pub fn dilate_by_distance(mask: ArrayView2<bool>, buffer_distance: f64, resolution: f64) -> Result<Array2<bool>> {
    let iterations = buffer_iterations(buffer_distance, resolution)?;
    Ok(dilate(mask, iterations))
}

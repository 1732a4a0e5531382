use crate::error::{ensure_same_shape, ExtractError, Result};
use crate::raster::{GeoTransform, Window};
use log::debug;
use ndarray::{s, Array2, ArrayView2, Axis, Zip};

/// Cropped array with the transform and dimensions that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedArray {
    pub data: Array2<u8>,
    pub geotransform: GeoTransform,
    pub height: usize,
    pub width: usize,
}

/// Smallest window holding every true cell of `mask`.
pub fn bounding_window(mask: ArrayView2<bool>) -> Result<Window> {
    let occupied = |axis: Axis| -> Vec<usize> {
        mask.axis_iter(axis)
            .enumerate()
            .filter(|(_, lane)| lane.iter().any(|&v| v))
            .map(|(idx, _)| idx)
            .collect()
    };

    let rows = occupied(Axis(0));
    let (Some(&top_row), Some(&bottom_row)) = (rows.first(), rows.last()) else {
        return Err(ExtractError::EmptyExtract);
    };
    let cols = occupied(Axis(1));
    let (Some(&left_col), Some(&right_col)) = (cols.first(), cols.last()) else {
        return Err(ExtractError::EmptyExtract);
    };

    Ok(Window {
        row_off: top_row,
        col_off: left_col,
        height: bottom_row - top_row + 1,
        width: right_col - left_col + 1,
    })
}

/// Crop `data` to the bounding window of `mask`.
///
/// Cells inside the window but outside the mask are set to `nodata`. The
/// transform origin moves to the window's top-left corner.
pub fn crop_to_mask(
    mask: ArrayView2<bool>,
    data: ArrayView2<u8>,
    geotransform: &GeoTransform,
    nodata: u8,
) -> Result<CroppedArray> {
    ensure_same_shape(data.dim(), mask.dim())?;

    let window = bounding_window(mask)?;
    debug!(
        "Cropping window: rows {}..{}, cols {}..{}",
        window.row_off,
        window.row_end(),
        window.col_off,
        window.col_end()
    );

    let (rows, cols) = (window.row_off..window.row_end(), window.col_off..window.col_end());
    let cropped = Zip::from(data.slice(s![rows.clone(), cols.clone()]))
        .and(mask.slice(s![rows, cols]))
        .map_collect(|&value, &inside| if inside { value } else { nodata });

    Ok(CroppedArray {
        data: cropped,
        geotransform: geotransform.window_transform(&window),
        height: window.height,
        width: window.width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    const TRANSFORM: GeoTransform = GeoTransform([1000.0, 10.0, 0.0, 5000.0, 0.0, -10.0]);

    #[test]
    fn test_bounding_window() {
        let mask = arr2(&[
            [false, false, false, false, false],
            [false, false, true, false, false],
            [false, true, false, false, false],
            [false, false, false, true, false],
            [false, false, false, false, false],
        ]);
        let window = bounding_window(mask.view()).unwrap();
        assert_eq!(
            window,
            Window {
                row_off: 1,
                col_off: 1,
                height: 3,
                width: 3
            }
        );
    }

    #[test]
    fn test_empty_mask_fails() {
        let mask = Array2::from_elem((3, 3), false);
        assert!(matches!(bounding_window(mask.view()), Err(ExtractError::EmptyExtract)));

        let data = Array2::<u8>::zeros((3, 3));
        let result = crop_to_mask(mask.view(), data.view(), &TRANSFORM, 0);
        assert!(matches!(result, Err(ExtractError::EmptyExtract)));
    }

    #[test]
    fn test_crop_masks_cells_outside() {
        let mask = arr2(&[
            [false, false, false, false],
            [false, true, true, false],
            [false, false, true, false],
            [false, false, false, false],
        ]);
        let data = arr2(&[[1, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]]);
        let cropped = crop_to_mask(mask.view(), data.view(), &TRANSFORM, 0).unwrap();

        assert_eq!(cropped.data, arr2(&[[1, 2], [0, 1]]));
        assert_eq!((cropped.height, cropped.width), (2, 2));
        assert_eq!(cropped.geotransform.0, [1010.0, 10.0, 0.0, 4990.0, 0.0, -10.0]);
    }

    #[test]
    fn test_shape_matches_true_cell_extent() {
        let mask = Array2::from_shape_fn((8, 9), |(r, c)| (r == 2 && c == 7) || (r == 5 && c == 3));
        let data = Array2::<u8>::ones((8, 9));
        let cropped = crop_to_mask(mask.view(), data.view(), &TRANSFORM, 0).unwrap();
        assert_eq!(cropped.data.dim(), (5 - 2 + 1, 7 - 3 + 1));
        assert_eq!(cropped.data.dim(), (cropped.height, cropped.width));
    }

    #[test]
    fn test_recrop_is_noop() {
        let mask = arr2(&[
            [false, false, false],
            [true, false, false],
            [false, false, true],
        ]);
        let data = arr2(&[[1, 1, 1], [2, 2, 2], [1, 2, 1]]);
        let first = crop_to_mask(mask.view(), data.view(), &TRANSFORM, 0).unwrap();

        let cropped_mask = mask.slice(s![1..3, 0..3]).to_owned();
        let second = crop_to_mask(cropped_mask.view(), first.data.view(), &first.geotransform, 0).unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn test_shape_mismatch() {
        let mask = Array2::from_elem((2, 2), true);
        let data = Array2::<u8>::zeros((2, 3));
        let result = crop_to_mask(mask.view(), data.view(), &TRANSFORM, 0);
        assert!(matches!(result, Err(ExtractError::ShapeMismatch { .. })));
    }
}

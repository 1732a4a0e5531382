use log::debug;
use ndarray::{Array2, ArrayView2};
use std::collections::VecDeque;

/// Offsets of the eight neighbors of a cell.
pub(crate) const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Label the 8-connected components of the true cells of `mask`.
///
/// Returns the label grid (0 for false cells, a positive id per component)
/// and the number of components. Ids are handed out in scan order.
pub fn label_components(mask: ArrayView2<bool>) -> (Array2<u32>, usize) {
    let (nrows, ncols) = mask.dim();
    let mut labels = Array2::<u32>::zeros((nrows, ncols));
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    let mut next_label = 0u32;

    for row in 0..nrows {
        for col in 0..ncols {
            if !mask[[row, col]] || labels[[row, col]] != 0 {
                continue;
            }

            next_label += 1;
            labels[[row, col]] = next_label;
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                for &(dr, dc) in NEIGHBORS_8.iter() {
                    let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                        continue;
                    };
                    if nr >= nrows || nc >= ncols {
                        continue;
                    }
                    if mask[[nr, nc]] && labels[[nr, nc]] == 0 {
                        labels[[nr, nc]] = next_label;
                        queue.push_back((nr, nc));
                    }
                }
            }
        }
    }

    debug!("Labelled {} components in {}x{} grid", next_label, nrows, ncols);
    (labels, next_label as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn to_mask(grid: &Array2<u8>) -> Array2<bool> {
        grid.mapv(|v| v != 0)
    }

    /// Checks that two true cells share a label exactly when they are 8-connected,
    /// using a naive reachability search as reference.
    fn assert_labels_match_connectivity(mask: &Array2<bool>, labels: &Array2<u32>) {
        let (nrows, ncols) = mask.dim();
        let cells: Vec<(usize, usize)> = mask
            .indexed_iter()
            .filter(|(_, &v)| v)
            .map(|(idx, _)| idx)
            .collect();

        for (idx, &value) in mask.indexed_iter() {
            if !value {
                assert_eq!(labels[idx], 0);
            } else {
                assert!(labels[idx] > 0);
            }
        }

        for &start in &cells {
            let mut reached = Array2::<bool>::from_elem((nrows, ncols), false);
            let mut stack = vec![start];
            reached[start] = true;
            while let Some((r, c)) = stack.pop() {
                for r2 in r.saturating_sub(1)..(r + 2).min(nrows) {
                    for c2 in c.saturating_sub(1)..(c + 2).min(ncols) {
                        if mask[[r2, c2]] && !reached[[r2, c2]] {
                            reached[[r2, c2]] = true;
                            stack.push((r2, c2));
                        }
                    }
                }
            }
            for &other in &cells {
                assert_eq!(reached[other], labels[start] == labels[other]);
            }
        }
    }

    #[test]
    fn test_diagonal_cells_are_connected() {
        let mask = to_mask(&arr2(&[[1, 0, 0], [0, 1, 0], [0, 0, 1]]));
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 1);
        assert_labels_match_connectivity(&mask, &labels);
    }

    #[test]
    fn test_separate_components() {
        let mask = to_mask(&arr2(&[
            [1, 1, 0, 0, 1],
            [0, 1, 0, 0, 1],
            [0, 0, 0, 0, 0],
            [1, 0, 1, 1, 0],
            [1, 0, 0, 1, 0],
        ]));
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 4);
        assert_labels_match_connectivity(&mask, &labels);
    }

    #[test]
    fn test_u_shape_merges_into_one_component() {
        // Both arms are seen before the base joins them
        let mask = to_mask(&arr2(&[
            [1, 0, 0, 0, 1],
            [1, 0, 0, 0, 1],
            [1, 0, 0, 0, 1],
            [0, 1, 1, 1, 0],
        ]));
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 1);
        assert_labels_match_connectivity(&mask, &labels);
    }

    #[test]
    fn test_spiral() {
        let mask = to_mask(&arr2(&[
            [1, 1, 1, 1, 1, 1],
            [0, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 0, 1],
            [1, 0, 0, 1, 0, 1],
            [1, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1],
        ]));
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 1);
        assert_labels_match_connectivity(&mask, &labels);
    }

    #[test]
    fn test_empty_mask() {
        let mask = Array2::<bool>::from_elem((4, 3), false);
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 0);
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_full_mask() {
        let mask = Array2::<bool>::from_elem((3, 7), true);
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 1);
        assert_labels_match_connectivity(&mask, &labels);
    }

    #[test]
    fn test_checkerboard_is_one_component() {
        let mask = Array2::from_shape_fn((5, 5), |(r, c)| (r + c) % 2 == 0);
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 1);
        assert_labels_match_connectivity(&mask, &labels);
    }

    #[test]
    fn test_empty_grid() {
        let mask = Array2::<bool>::from_elem((0, 0), false);
        let (labels, count) = label_components(mask.view());
        assert_eq!(count, 0);
        assert_eq!(labels.dim(), (0, 0));
    }
}

//! Responsive cell sizing

/// Smallest usable cell edge
pub const MIN_CELL_SIZE: f64 = 8.0;

/// Gap between adjacent week columns
pub const CELL_GAP: f64 = 4.0;

/// Edge length of one cell so `columns` cells and their gaps fill
/// `container_width`, never below [`MIN_CELL_SIZE`].
///
/// Recompute on container resize and whenever the grid (and so possibly its
/// column count) changes.
pub fn cell_size(container_width: f64, columns: usize, gap: f64) -> f64 {
    let columns = columns.max(1) as f64;
    let available = container_width.max(0.0) - gap * (columns - 1.0);
    (available / columns).max(MIN_CELL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_wide_container() {
        // 53 * 16 + 52 * 4 = 1056
        assert_eq!(cell_size(1056.0, 53, CELL_GAP), 16.0);
    }

    #[test]
    fn test_minimum_on_narrow_container() {
        assert_eq!(cell_size(300.0, 53, CELL_GAP), MIN_CELL_SIZE);
    }

    #[test]
    fn test_zero_and_negative_width() {
        assert_eq!(cell_size(0.0, 53, CELL_GAP), MIN_CELL_SIZE);
        assert_eq!(cell_size(-50.0, 54, CELL_GAP), MIN_CELL_SIZE);
        assert_eq!(cell_size(f64::NAN, 53, CELL_GAP), MIN_CELL_SIZE);
    }

    #[test]
    fn test_never_below_minimum() {
        for width in 0..3000 {
            for columns in [53, 54] {
                assert!(cell_size(width as f64, columns, CELL_GAP) >= MIN_CELL_SIZE);
            }
        }
    }

    #[test]
    fn test_more_columns_shrink_cells() {
        assert!(cell_size(1200.0, 54, CELL_GAP) < cell_size(1200.0, 53, CELL_GAP));
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        assert_eq!(cell_size(100.0, 0, CELL_GAP), 100.0);
    }
}

#![forbid(unsafe_code)]

//! Bounded-fit sizing: pick the largest integer vertex size that fits a
//! pixel budget, and the leftover padding that centers the board in it.
//!
//! Sizing works in "em" units relative to the vertex size: the content area
//! is one em per cell, plus border, padding, and (optionally) coordinate
//! gutters on both sides.

use thiserror::Error;

/// Board border width, in ems.
pub const BORDER_WIDTH_EM: f32 = 0.15;

/// Inner padding when coordinates are hidden, in ems.
pub const DEFAULT_PADDING_EM: f32 = 0.25;

/// Space reserved for one coordinate label gutter, in ems.
pub const COORD_GUTTER_EM: f32 = 1.0;

/// Layout inputs for sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConfig {
    /// Visible column count (after range clamping).
    pub cols: u16,
    /// Visible row count (after range clamping).
    pub rows: u16,
    pub show_coordinates: bool,
    /// Coordinates outside the border need their own padding; inside the
    /// border the gutter doubles as padding.
    pub coordinates_on_outside: bool,
}

/// Sizing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    #[error("at least one of target width or target height must be given")]
    NoBounds,
    #[error("target dimensions too small: need at least {min_width}x{min_height}px")]
    TooSmall { min_width: u32, min_height: u32 },
}

/// A resolved fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedSize {
    /// Largest whole-pixel vertex size that fits both bounds.
    pub vertex_size: u32,
    /// Residual horizontal padding per side; zero without a width bound.
    pub padding_x: f32,
    /// Residual vertical padding per side; zero without a height bound.
    pub padding_y: f32,
}

/// Total em units the board occupies on each axis.
#[must_use]
pub fn total_ems(config: SizeConfig) -> (f32, f32) {
    let chrome = if config.show_coordinates {
        if config.coordinates_on_outside {
            2.0 * COORD_GUTTER_EM + 2.0 * DEFAULT_PADDING_EM + 2.0 * BORDER_WIDTH_EM
        } else {
            2.0 * COORD_GUTTER_EM + 2.0 * BORDER_WIDTH_EM
        }
    } else {
        2.0 * DEFAULT_PADDING_EM + 2.0 * BORDER_WIDTH_EM
    };
    (
        f32::from(config.cols) + chrome,
        f32::from(config.rows) + chrome,
    )
}

/// Fit the board into the given pixel bounds.
///
/// The vertex size is floored to a whole pixel so grid lines stay crisp; the
/// imperfect fit that flooring leaves behind comes back as per-side padding.
pub fn calculate_bounded_size(
    target_width: Option<f32>,
    target_height: Option<f32>,
    config: SizeConfig,
) -> Result<BoundedSize, SizeError> {
    let (ems_x, ems_y) = total_ems(config);

    let vertex_size = match (target_width, target_height) {
        (None, None) => return Err(SizeError::NoBounds),
        (Some(w), Some(h)) => (w / ems_x).min(h / ems_y).floor(),
        (Some(w), None) => (w / ems_x).floor(),
        (None, Some(h)) => (h / ems_y).floor(),
    };

    if vertex_size < 1.0 {
        return Err(SizeError::TooSmall {
            min_width: ems_x.ceil() as u32,
            min_height: ems_y.ceil() as u32,
        });
    }

    let actual_width = vertex_size * ems_x;
    let actual_height = vertex_size * ems_y;
    Ok(BoundedSize {
        vertex_size: vertex_size as u32,
        padding_x: target_width.map_or(0.0, |w| ((w - actual_width) / 2.0).max(0.0)),
        padding_y: target_height.map_or(0.0, |h| ((h - actual_height) / 2.0).max(0.0)),
    })
}

#[cfg(test)]
mod tests {
    use super::{SizeConfig, SizeError, calculate_bounded_size, total_ems};

    fn config(cols: u16, rows: u16) -> SizeConfig {
        SizeConfig {
            cols,
            rows,
            show_coordinates: false,
            coordinates_on_outside: false,
        }
    }

    #[test]
    fn plain_board_ems() {
        let (x, y) = total_ems(config(19, 19));
        assert_eq!(x, 19.8);
        assert_eq!(y, 19.8);
    }

    #[test]
    fn coordinate_gutter_replaces_padding_inside() {
        let mut cfg = config(9, 9);
        cfg.show_coordinates = true;
        assert_eq!(total_ems(cfg), (11.3, 11.3));
        cfg.coordinates_on_outside = true;
        assert_eq!(total_ems(cfg), (11.8, 11.8));
    }

    #[test]
    fn fit_floors_and_pads() {
        let fit = calculate_bounded_size(Some(600.0), Some(600.0), config(19, 19)).unwrap();
        // 600 / 19.8 = 30.30..., floored.
        assert_eq!(fit.vertex_size, 30);
        // (600 - 30 * 19.8) / 2 per side.
        assert!((fit.padding_x - 3.0).abs() < 1e-4);
        assert_eq!(fit.padding_x, fit.padding_y);
    }

    #[test]
    fn single_bound_fits_that_axis() {
        let fit = calculate_bounded_size(Some(400.0), None, config(9, 13)).unwrap();
        assert_eq!(fit.vertex_size, 40);
        assert_eq!(fit.padding_y, 0.0);

        let fit = calculate_bounded_size(None, Some(400.0), config(9, 13)).unwrap();
        // Height axis is the taller one: 400 / 13.8 floored.
        assert_eq!(fit.vertex_size, 28);
        assert_eq!(fit.padding_x, 0.0);
    }

    #[test]
    fn no_bounds_is_an_error() {
        assert_eq!(
            calculate_bounded_size(None, None, config(9, 9)),
            Err(SizeError::NoBounds)
        );
    }

    #[test]
    fn too_small_reports_minimum() {
        let err = calculate_bounded_size(Some(10.0), Some(10.0), config(19, 19)).unwrap_err();
        assert_eq!(
            err,
            SizeError::TooSmall {
                min_width: 20,
                min_height: 20,
            }
        );
    }

    #[test]
    fn fit_error_stays_under_one_vertex() {
        for target in [100.0, 333.0, 512.0, 1000.0] {
            let fit = calculate_bounded_size(Some(target), Some(target), config(19, 19)).unwrap();
            let (ems, _) = total_ems(config(19, 19));
            let used = fit.vertex_size as f32 * ems + 2.0 * fit.padding_x;
            assert!((used - target).abs() < 1.0, "target {target}");
        }
    }
}

//! Geographic-to-screen projection.
//!
//! Simple equirectangular projection: longitude/latitude map linearly onto
//! the viewport, with a cosine correction for the east-west compression of a
//! degree of longitude. proj4-style cartography would be more precise, but
//! also much harder, and the dashboard only needs relative placement.
//! See https://stackoverflow.com/questions/16266809 for the background.

use cachecache_common::{GeoPoint, ScreenPoint, Viewport};

/// Scale applied to a zero-range axis, relative to the viewport height.
/// Only matters for a single point or a perfect row/column of points; any
/// value that keeps the markers visibly zoomed in works.
const DEGENERATE_ZOOM: f64 = 0.8;

/// A projection fitted to the bounding box of a point set.
///
/// Recomputed from scratch whenever the active point set changes; holds no
/// state beyond the fitted parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    viewport: Viewport,
    scale_factor: f64,
    aspect_ratio: f64,
    origin_longitude: f64,
    origin_latitude: f64,
    degenerate: bool,
}

impl Projection {
    /// Fit a projection so every point in `points` lands inside `viewport`.
    ///
    /// `points` must be non-empty with finite coordinates; the ingestion
    /// boundary guarantees both. A single point, or points forming a
    /// perfectly horizontal or vertical line, are designed cases, not errors.
    pub fn fit(points: &[GeoPoint], viewport: Viewport) -> Projection {
        debug_assert!(!points.is_empty(), "projection requires at least one point");

        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lon = min_lon.min(p.longitude);
            max_lon = max_lon.max(p.longitude);
        }

        let lat_range = max_lat - min_lat;
        let lon_range = max_lon - min_lon;

        // Fixed per-fit correction for the latitude band. Using min_lat
        // rather than the mean latitude is an accepted approximation; the
        // difference is invisible at dashboard scale.
        let aspect_ratio = min_lat.to_radians().cos();

        // A zero-range axis would otherwise divide by zero; substitute a
        // large constant so the point set still renders zoomed in.
        let default_scale = viewport.height() * DEGENERATE_ZOOM;
        let from_width = if lon_range > 0.0 {
            viewport.width() / (lon_range * aspect_ratio)
        } else {
            default_scale
        };
        let from_height = if lat_range > 0.0 {
            viewport.height() / lat_range
        } else {
            default_scale
        };

        // The binding constraint is whichever axis would overflow first.
        let scale_factor = from_width.min(from_height);

        // Center the bounding box in the viewport.
        let width_degrees = viewport.width() / (scale_factor * aspect_ratio);
        let height_degrees = viewport.height() / scale_factor;
        let origin_longitude = min_lon - (width_degrees - lon_range) / 2.0;
        let origin_latitude = min_lat - (height_degrees - lat_range) / 2.0;

        Projection {
            viewport,
            scale_factor,
            aspect_ratio,
            origin_longitude,
            origin_latitude,
            degenerate: lon_range == 0.0 || lat_range == 0.0,
        }
    }

    /// Project a geographic point to viewport pixels.
    ///
    /// (0,0) is the top-left corner, so geographic north maps to smaller y.
    /// Every point inside the fitted bounding box projects inside the
    /// viewport; points outside the box may project outside it.
    pub fn project(&self, point: GeoPoint) -> ScreenPoint {
        let x = (point.longitude - self.origin_longitude) * self.scale_factor * self.aspect_ratio;
        let y = self.viewport.height()
            - (point.latitude - self.origin_latitude) * self.scale_factor;
        ScreenPoint { x, y }
    }

    /// True when the fitted bounding box had zero width and/or height.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Degrees of longitude the viewport spans at this scale. The map-image
    /// underlay needs the spans to pick tiles.
    pub fn width_degrees(&self) -> f64 {
        self.viewport.width() / (self.scale_factor * self.aspect_ratio)
    }

    /// Degrees of latitude the viewport spans at this scale.
    pub fn height_degrees(&self) -> f64 {
        self.viewport.height() / self.scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn paris_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint { longitude: 2.3364, latitude: 48.8606 }, // Louvre
            GeoPoint { longitude: 2.2945, latitude: 48.8584 }, // Eiffel Tower
            GeoPoint { longitude: 2.3499, latitude: 48.8530 }, // Notre-Dame
            GeoPoint { longitude: 2.3912, latitude: 48.8530 }, // further east
        ]
    }

    fn assert_in_viewport(projection: &Projection, point: GeoPoint) {
        let screen = projection.project(point);
        let viewport = projection.viewport();
        assert!(
            screen.x >= -TOLERANCE && screen.x <= viewport.width() + TOLERANCE,
            "x = {} outside [0, {}]",
            screen.x,
            viewport.width()
        );
        assert!(
            screen.y >= -TOLERANCE && screen.y <= viewport.height() + TOLERANCE,
            "y = {} outside [0, {}]",
            screen.y,
            viewport.height()
        );
    }

    #[test]
    fn single_point_projects_to_center() {
        let point = GeoPoint { longitude: 2.3522, latitude: 48.8606 };
        let viewport = Viewport::new(1000, 650);
        let projection = Projection::fit(&[point], viewport);

        let screen = projection.project(point);
        assert!((screen.x - 500.0).abs() < TOLERANCE);
        assert!((screen.y - 325.0).abs() < TOLERANCE);
        assert!(projection.is_degenerate());
    }

    #[test]
    fn all_points_land_inside_the_viewport() {
        let viewport = Viewport::new(1000, 650);
        let points = paris_points();
        let projection = Projection::fit(&points, viewport);
        assert!(projection.scale_factor() > 0.0);
        for p in points {
            assert_in_viewport(&projection, p);
        }
    }

    #[test]
    fn bounding_holds_for_degenerate_lines() {
        let viewport = Viewport::new(640, 480);

        // Vertical line: identical longitudes.
        let column = vec![
            GeoPoint { longitude: 2.3522, latitude: 48.80 },
            GeoPoint { longitude: 2.3522, latitude: 48.85 },
            GeoPoint { longitude: 2.3522, latitude: 48.90 },
        ];
        let projection = Projection::fit(&column, viewport);
        assert!(projection.is_degenerate());
        for p in &column {
            assert_in_viewport(&projection, *p);
        }

        // Horizontal line: identical latitudes.
        let row = vec![
            GeoPoint { longitude: 2.30, latitude: 48.8606 },
            GeoPoint { longitude: 2.35, latitude: 48.8606 },
            GeoPoint { longitude: 2.40, latitude: 48.8606 },
        ];
        let projection = Projection::fit(&row, viewport);
        assert!(projection.is_degenerate());
        for p in &row {
            assert_in_viewport(&projection, *p);
        }

        // All points identical.
        let stacked = vec![
            GeoPoint { longitude: -93.27, latitude: 44.96 },
            GeoPoint { longitude: -93.27, latitude: 44.96 },
        ];
        let projection = Projection::fit(&stacked, viewport);
        assert_in_viewport(&projection, stacked[0]);
    }

    #[test]
    fn north_is_up() {
        // Same longitude, 0.01 degrees of latitude apart, 1000x650 viewport:
        // the northern point must sit strictly higher (smaller y), same x.
        let south = GeoPoint { longitude: 2.3522, latitude: 48.8606 };
        let north = GeoPoint { longitude: 2.3522, latitude: 48.8706 };
        let projection = Projection::fit(&[south, north], Viewport::new(1000, 650));

        let south_px = projection.project(south);
        let north_px = projection.project(north);
        assert!(north_px.y < south_px.y, "north should be above south");
        assert!((north_px.x - south_px.x).abs() < TOLERANCE);
    }

    #[test]
    fn east_is_right() {
        let west = GeoPoint { longitude: 2.30, latitude: 48.86 };
        let east = GeoPoint { longitude: 2.40, latitude: 48.86 };
        let projection = Projection::fit(&[west, east], Viewport::new(1000, 650));

        let west_px = projection.project(west);
        let east_px = projection.project(east);
        assert!(east_px.x > west_px.x, "east should be to the right of west");
        assert!((east_px.y - west_px.y).abs() < TOLERANCE);
    }

    #[test]
    fn southern_hemisphere_fits_too() {
        let viewport = Viewport::new(800, 600);
        let points = vec![
            GeoPoint { longitude: 151.2093, latitude: -33.8688 }, // Sydney
            GeoPoint { longitude: 150.8931, latitude: -34.4278 }, // Wollongong
        ];
        let projection = Projection::fit(&points, viewport);
        for p in points {
            assert_in_viewport(&projection, p);
        }
    }

    #[test]
    fn degree_spans_cover_the_bounding_box() {
        let points = paris_points();
        let projection = Projection::fit(&points, Viewport::new(1000, 650));
        let lon_range = 2.3912 - 2.2945;
        let lat_range = 48.8606 - 48.8530;
        assert!(projection.width_degrees() >= lon_range - TOLERANCE);
        assert!(projection.height_degrees() >= lat_range - TOLERANCE);
    }
}

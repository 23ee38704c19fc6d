//! Defines a struct to represent a bounding box on the campus plan. This is
//! used when rendering a completed route, as it can be used to set the
//! viewport on a map visualization

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};
use serde::Serialize;

/// A bounding box in campus plan coordinates. Contains the minimum and
/// maximum x & y values, defining a rectangle on the plan
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Create a new bounding box from a geo rectangle
    pub fn from_rect(rect: &Rect) -> Self {
        let min = rect.min();
        let max = rect.max();

        BBox {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        }
    }

    /// Create the smallest bounding box which contains all of the provided
    /// coordinates. Returns None if no coordinates are provided
    pub fn from_coords(coords: &[Coord]) -> Option<Self> {
        let points: MultiPoint =
            coords.iter().map(|coord| Point::from(*coord)).collect();
        points.bounding_rect().map(|rect| BBox::from_rect(&rect))
    }

    /// Determine the point at the centre of the bounding box
    pub fn get_centre(&self) -> (f64, f64) {
        let x_delta = self.max_x - self.min_x;
        let y_delta = self.max_y - self.min_y;
        (self.min_x + (x_delta / 2.0), self.min_y + (y_delta / 2.0))
    }
}

//! Defines the functions which describe the physical geometry of a route,
//! both the curve used to draw each segment and the full sequence of points
//! which make up a completed route
use geo::Coord;
use serde::Serialize;

use crate::common::bbox::BBox;
use crate::common::campus_graph::CampusGraph;
use crate::common::graph_data::{Location, LocationId, PathType};

/// How far the control point of each segment's curve is pushed away from
/// the midpoint, as a fraction of the segment's extent along its main axis
pub const CURVE_FACTOR: f64 = 0.2;

/// Number of intervals the curve is split into. One point is generated for
/// each interior boundary, so the endpoints themselves are never included
const CURVE_STEPS: u32 = 10;

/// A single renderable point along a route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailRecord {
    /// A location visited by the route
    Node {
        x: f64,
        y: f64,
        node_id: LocationId,
        name: String,
        from_node: LocationId,
        to_node: LocationId,
    },
    /// A point on the curve between two locations
    Path {
        x: f64,
        y: f64,
        path_type: PathType,
        from_node: LocationId,
        to_node: LocationId,
    },
}

impl DetailRecord {
    fn node(
        location: &Location,
        from_node: LocationId,
        to_node: LocationId,
    ) -> DetailRecord {
        DetailRecord::Node {
            x: location.position.x,
            y: location.position.y,
            node_id: location.id,
            name: location.name.clone(),
            from_node,
            to_node,
        }
    }

    pub fn position(&self) -> Coord {
        match self {
            DetailRecord::Node { x, y, .. } => Coord { x: *x, y: *y },
            DetailRecord::Path { x, y, .. } => Coord { x: *x, y: *y },
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, DetailRecord::Node { .. })
    }
}

/// Determine the control point for the curve between two points. The
/// midpoint is pushed along whichever axis the segment spans least, so that
/// the curve bows out to one side of the straight line
pub fn get_control_point(start: Coord, end: Coord, curve_factor: f64) -> Coord {
    let dx = (start.x - end.x).abs();
    let dy = (start.y - end.y).abs();

    let mut mid = Coord {
        x: (start.x + end.x) / 2.0,
        y: (start.y + end.y) / 2.0,
    };

    if dx > dy {
        mid.y += curve_factor * dx;
    } else {
        mid.x += curve_factor * dy;
    }

    mid
}

/// Position on the quadratic bezier curve defined by start, control & end
/// at parameter t
pub fn quadratic_bezier(
    start: Coord,
    control: Coord,
    end: Coord,
    t: f64,
) -> Coord {
    let a = (1.0 - t).powi(2);
    let b = 2.0 * (1.0 - t) * t;
    let c = t.powi(2);

    Coord {
        x: a * start.x + b * control.x + c * end.x,
        y: a * start.y + b * control.y + c * end.y,
    }
}

/// Generate the points used to draw a curved segment between two
/// locations, excluding the locations themselves
pub fn generate_path_points(
    start: Coord,
    end: Coord,
    curve_factor: f64,
) -> Vec<Coord> {
    let control = get_control_point(start, end, curve_factor);

    (1..CURVE_STEPS)
        .map(|step| {
            let t = step as f64 / CURVE_STEPS as f64;
            quadratic_bezier(start, control, end, t)
        })
        .collect()
}

/// Expand a route into the full list of points needed to draw it. Each
/// location is emitted once, with the cached curve points of the segment
/// joining it to the next location in between
pub fn get_path_details(
    campus: &CampusGraph,
    route: &[LocationId],
) -> Vec<DetailRecord> {
    let mut details = Vec::<DetailRecord>::new();

    for (inx, pair) in route.windows(2).enumerate() {
        let (from_node, to_node) = (pair[0], pair[1]);

        if inx == 0 {
            if let Some(location) = campus.location(from_node) {
                details.push(DetailRecord::node(location, from_node, to_node));
            }
        }

        if let Some(segment) = campus.edge(from_node, to_node) {
            for point in segment.path_points.iter() {
                details.push(DetailRecord::Path {
                    x: point.x,
                    y: point.y,
                    path_type: segment.path_type,
                    from_node,
                    to_node,
                });
            }
        }

        if let Some(location) = campus.location(to_node) {
            details.push(DetailRecord::node(location, from_node, to_node));
        }
    }

    details
}

/// Bounding box around every point in a set of details
pub fn get_details_bbox(details: &[DetailRecord]) -> Option<BBox> {
    let coords: Vec<Coord> =
        details.iter().map(|record| record.position()).collect();
    BBox::from_coords(&coords)
}

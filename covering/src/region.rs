//! Regions on the unit sphere that the S2 region coverer can work
//! against.
//!
//! The `s2` crate only ships caps, rects and cells as regions, so loops
//! get their own [`Region`] implementation here. All edges, both of our
//! loops and of S2 cells, are great circle arcs, which lets cell
//! containment and intersection be decided with edge crossing
//! predicates instead of lat/lng approximations. Point-in-cell tests
//! go through the `s2` cell itself.

use crate::feature::InputGeometry;
use geo::geometry::{Coord, Polygon};
use s2::{
    cap::Cap, cell::Cell, latlng::LatLng, point::Point, r3::vector::Vector, rect::Rect,
    region::Region,
};
use std::f64::consts::PI;

/// Height of a cap covering the whole sphere.
const FULL_HEIGHT: f64 = 2.0;

/// Slack added to loop cap heights to absorb rounding in the vertex
/// conversions.
const CAP_MARGIN: f64 = 1e-12;

/// Maps a GeoJSON coordinate (`x` longitude, `y` latitude) onto the unit
/// sphere.
pub fn unit_point(coord: Coord<f64>) -> Point {
    Point::from(LatLng::from_degrees(coord.y, coord.x))
}

/// Sign of the triple product `(a × b) · c`, i.e. which side of the
/// great circle through `a` and `b` the point `c` lies on. Positive is
/// left.
fn sign(a: &Vector, b: &Vector, c: &Vector) -> i8 {
    let det = a.cross(b).dot(c);
    if det > 0.0 {
        1
    } else if det < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether arcs `ab` and `cd` cross at a point interior to both.
fn arcs_cross(a: &Vector, b: &Vector, c: &Vector, d: &Vector) -> bool {
    let acb = -sign(a, b, c);
    let bda = sign(a, b, d);
    if acb == 0 || acb != bda {
        return false;
    }
    let cbd = -sign(c, d, b);
    let dac = sign(c, d, a);
    acb == cbd && cbd == dac
}

/// Signed angle at `p` swept going from `a` to `b`.
fn turn_angle(p: &Vector, a: &Vector, b: &Vector) -> f64 {
    let sin = p.dot(&a.cross(b));
    let cos = a.dot(b) - p.dot(a) * p.dot(b);
    sin.atan2(cos)
}

fn edges(vertices: &[Vector]) -> impl Iterator<Item = (&Vector, &Vector)> {
    vertices.iter().zip(vertices.iter().cycle().skip(1))
}

/// Corners of `cell` in counter-clockwise order.
fn cell_quad(cell: &Cell) -> [Vector; 4] {
    [
        cell.vertex(0).0,
        cell.vertex(1).0,
        cell.vertex(2).0,
        cell.vertex(3).0,
    ]
}

/// A simple spherical loop with no holes. The interior is to the left
/// of the edges, and the loop must fit within a hemisphere.
#[derive(Clone, Debug)]
pub struct LoopRegion {
    vertices: Vec<Vector>,
    center: Vector,
    height: f64,
}

impl LoopRegion {
    /// Builds a loop from `polygon`'s exterior ring. Interior rings are
    /// ignored. Clockwise rings are reversed, so the interior is always
    /// the smaller side of the ring.
    pub fn new(polygon: &Polygon<f64>) -> Self {
        let mut vertices: Vec<Vector> = polygon
            .exterior()
            .coords()
            .map(|coord| unit_point(*coord).0)
            .collect();
        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        let (center, height) = bounding_cap(&vertices);
        if height < 1.0 && projected_area(&vertices, &center) < 0.0 {
            vertices.reverse();
        }
        Self {
            vertices,
            center,
            height,
        }
    }

    pub fn contains(&self, p: &Vector) -> bool {
        if self.vertices.len() < 3 || 1.0 - self.center.dot(p) > self.height {
            return false;
        }
        let winding: f64 = edges(&self.vertices)
            .map(|(a, b)| turn_angle(p, a, b))
            .sum();
        winding > PI
    }

    fn crosses_quad(&self, quad: &[Vector; 4]) -> bool {
        edges(&self.vertices)
            .any(|(a, b)| edges(quad).any(|(c, d)| arcs_cross(a, b, c, d)))
    }

    fn contains_cell(&self, cell: &Cell) -> bool {
        let quad = cell_quad(cell);
        quad.iter().all(|v| self.contains(v)) && !self.crosses_quad(&quad)
    }

    fn intersects_cell(&self, cell: &Cell) -> bool {
        let quad = cell_quad(cell);
        quad.iter().any(|v| self.contains(v))
            || self.vertices.iter().any(|v| cell.contains_point(&Point(*v)))
            || self.crosses_quad(&quad)
    }
}

/// Twice the signed area of `vertices` in the gnomonic projection
/// centered on `center`. Gnomonic projection maps great circles to
/// straight lines, so the shoelace sum gives the loop's orientation as
/// seen from outside the sphere: positive is counter-clockwise. All
/// vertices must be in the open hemisphere around `center`.
fn projected_area(vertices: &[Vector], center: &Vector) -> f64 {
    edges(vertices)
        .map(|(a, b)| center.dot(&a.cross(b)) / (center.dot(a) * center.dot(b)))
        .sum()
}

/// Center and height of a cap around `vertices`, or a full cap when
/// they do not fit in a hemisphere.
fn bounding_cap(vertices: &[Vector]) -> (Vector, f64) {
    let sum = vertices.iter().fold(
        Vector {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        |acc, v| Vector {
            x: acc.x + v.x,
            y: acc.y + v.y,
            z: acc.z + v.z,
        },
    );
    if sum.norm() < 1e-12 {
        return (
            Vector {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
            FULL_HEIGHT,
        );
    }
    let center = sum.normalize();
    let min_dot = vertices
        .iter()
        .map(|v| center.dot(v))
        .fold(1.0_f64, f64::min);
    let height = 1.0 - min_dot;
    if height >= 1.0 {
        (center, FULL_HEIGHT)
    } else {
        (center, height + CAP_MARGIN)
    }
}

/// A single point. It intersects the cells touching it but contains
/// none, so its interior covering is always empty.
#[derive(Clone, Debug)]
pub struct PointRegion {
    point: Point,
}

impl PointRegion {
    pub fn new(coord: Coord<f64>) -> Self {
        Self {
            point: unit_point(coord),
        }
    }
}

/// Any region we know how to cover.
#[derive(Clone, Debug)]
pub enum CoverRegion {
    Loop(LoopRegion),
    Point(PointRegion),
}

impl From<&InputGeometry> for CoverRegion {
    fn from(geometry: &InputGeometry) -> Self {
        match geometry {
            InputGeometry::Point(point) => Self::Point(PointRegion::new(point.0)),
            InputGeometry::Polygon(polygon) => Self::Loop(LoopRegion::new(polygon)),
        }
    }
}

impl Region for CoverRegion {
    fn cap_bound(&self) -> Cap {
        match self {
            Self::Loop(region) => Cap::from_center_height(&Point(region.center), region.height),
            Self::Point(region) => Cap::from_center_height(&region.point, 0.0),
        }
    }

    fn rect_bound(&self) -> Rect {
        self.cap_bound().rect_bound()
    }

    fn contains_cell(&self, cell: &Cell) -> bool {
        match self {
            Self::Loop(region) => region.contains_cell(cell),
            Self::Point(_) => false,
        }
    }

    fn intersects_cell(&self, cell: &Cell) -> bool {
        match self {
            Self::Loop(region) => region.intersects_cell(cell),
            Self::Point(region) => cell.contains_point(&region.point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, polygon};
    use s2::cellid::CellID;

    fn square(half: f64) -> LoopRegion {
        LoopRegion::new(&polygon![
            (x: -half, y: -half),
            (x: half, y: -half),
            (x: half, y: half),
            (x: -half, y: half),
        ])
    }

    #[test]
    fn test_loop_vertices_drop_closing_point() {
        assert_eq!(square(1.0).vertices.len(), 4);
    }

    #[test]
    fn test_loop_contains() {
        let region = square(1.0);
        assert!(region.contains(&unit_point(coord! { x: 0.0, y: 0.0 }).0));
        assert!(region.contains(&unit_point(coord! { x: 0.9, y: -0.9 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 1.1, y: 0.0 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 180.0, y: 0.0 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 0.0, y: 89.0 }).0));
    }

    #[test]
    fn test_concave_loop_contains() {
        // A "U" opening north.
        let region = LoopRegion::new(&polygon![
            (x: 0.0, y: 0.0),
            (x: 3.0, y: 0.0),
            (x: 3.0, y: 3.0),
            (x: 2.0, y: 3.0),
            (x: 2.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 3.0),
            (x: 0.0, y: 3.0),
        ]);
        assert!(region.contains(&unit_point(coord! { x: 0.5, y: 2.5 }).0));
        assert!(region.contains(&unit_point(coord! { x: 1.5, y: 0.5 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 1.5, y: 2.0 }).0));
    }

    #[test]
    fn test_arcs_cross() {
        let p = |x: f64, y: f64| unit_point(coord! { x: x, y: y }).0;
        assert!(arcs_cross(&p(-1.0, 0.0), &p(1.0, 0.0), &p(0.0, -1.0), &p(0.0, 1.0)));
        assert!(!arcs_cross(&p(-1.0, 0.0), &p(1.0, 0.0), &p(0.0, 0.5), &p(0.0, 1.0)));
        // Same great circles, but the arcs meet only at each other's
        // antipodes.
        assert!(!arcs_cross(&p(-1.0, 0.0), &p(1.0, 0.0), &p(180.0, -1.0), &p(180.0, 1.0)));
    }

    #[test]
    fn test_cell_relations() {
        let region = CoverRegion::Loop(square(1.0));
        let center = CellID::from(LatLng::from_degrees(0.0, 0.0));

        // A leaf cell at the origin sits well inside the square.
        let leaf = Cell::from(center);
        assert!(region.contains_cell(&leaf));
        assert!(region.intersects_cell(&leaf));

        // A face cell is much larger than the square: it intersects
        // but is not contained.
        let face = Cell::from(center.parent(0));
        assert!(!region.contains_cell(&face));
        assert!(region.intersects_cell(&face));

        // Far away.
        let far = Cell::from(CellID::from(LatLng::from_degrees(45.0, 90.0)).parent(10));
        assert!(!region.contains_cell(&far));
        assert!(!region.intersects_cell(&far));
    }

    #[test]
    fn test_point_region() {
        let region = PointRegion::new(coord! { x: -122.0841, y: 37.422 });
        let id = CellID::from(LatLng::from_degrees(37.422, -122.0841));
        let cover = CoverRegion::Point(region.clone());
        assert!(cover.intersects_cell(&Cell::from(id.parent(12))));
        assert!(!cover.contains_cell(&Cell::from(id.parent(12))));
        assert!(Cell::from(id.parent(20)).contains_point(&region.point));
    }

    #[test]
    fn test_point_region_at_leaf_level() {
        let region = CoverRegion::Point(PointRegion::new(coord! { x: -122.0841, y: 37.422 }));
        let leaf = CellID::from(LatLng::from_degrees(37.422, -122.0841));
        for level in [24, 26, 28, 30] {
            assert!(
                region.intersects_cell(&Cell::from(leaf.parent(level))),
                "level {level} cell misses its own point"
            );
        }
    }

    #[test]
    fn test_clockwise_loop_is_reversed() {
        let region = LoopRegion::new(&polygon![
            (x: -1.0, y: -1.0),
            (x: -1.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: -1.0),
        ]);
        assert!(region.contains(&unit_point(coord! { x: 0.0, y: 0.0 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 2.0, y: 0.0 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 180.0, y: 0.0 }).0));
    }

    #[test]
    fn test_antimeridian_loop() {
        // Counter-clockwise on the sphere, clockwise in lng/lat.
        let region = LoopRegion::new(&polygon![
            (x: 170.0, y: 0.0),
            (x: -170.0, y: 0.0),
            (x: -170.0, y: 10.0),
            (x: 170.0, y: 10.0),
        ]);
        assert!(region.contains(&unit_point(coord! { x: 180.0, y: 5.0 }).0));
        assert!(region.contains(&unit_point(coord! { x: 175.0, y: 5.0 }).0));
        assert!(region.contains(&unit_point(coord! { x: -175.0, y: 5.0 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 165.0, y: 5.0 }).0));
        assert!(!region.contains(&unit_point(coord! { x: 0.0, y: 5.0 }).0));
    }
}

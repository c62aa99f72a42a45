//! Geometry values handed to the encoder
//!
//! Linear geometries come from the `geo` crate. Rings and curves, which `geo`
//! does not model, are small validated wrappers around coordinate sequences.

use crate::{EncodeError, Result};
use geo::{
    BoundingRect, Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    Rect,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural category of a geometry, the key of the encoder registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    Point,
    MultiPoint,
    LineString,
    LinearRing,
    MultiLineString,
    Polygon,
    MultiPolygon,
    CircularString,
    CompoundCurve,
    CircularRing,
    CompoundRing,
}

impl ShapeKind {
    /// Every shape kind, in declaration order
    pub const ALL: [ShapeKind; 11] = [
        ShapeKind::Point,
        ShapeKind::MultiPoint,
        ShapeKind::LineString,
        ShapeKind::LinearRing,
        ShapeKind::MultiLineString,
        ShapeKind::Polygon,
        ShapeKind::MultiPolygon,
        ShapeKind::CircularString,
        ShapeKind::CompoundCurve,
        ShapeKind::CircularRing,
        ShapeKind::CompoundRing,
    ];

    /// Whether this kind is one of the curved (non-linear) line kinds
    #[inline]
    pub fn is_curve(self) -> bool {
        matches!(
            self,
            ShapeKind::CircularString
                | ShapeKind::CompoundCurve
                | ShapeKind::CircularRing
                | ShapeKind::CompoundRing
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A closed line string with at least four positions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LineString<f64>"))]
pub struct LinearRing(LineString<f64>);

impl LinearRing {
    pub fn new(line: LineString<f64>) -> Result<Self> {
        if line.0.len() < 4 {
            return Err(EncodeError::InvalidGeometry(format!(
                "linear ring needs at least 4 positions, got {}",
                line.0.len()
            )));
        }
        if !line.is_closed() {
            return Err(EncodeError::InvalidGeometry(
                "linear ring is not closed".to_string(),
            ));
        }
        Ok(Self(line))
    }

    #[inline]
    pub fn line(&self) -> &LineString<f64> {
        &self.0
    }
}

impl TryFrom<LineString<f64>> for LinearRing {
    type Error = EncodeError;

    fn try_from(line: LineString<f64>) -> Result<Self> {
        Self::new(line)
    }
}

/// A sequence of circular arcs sharing end points
///
/// Each arc is described by three control points (start, any point on the arc,
/// end) and consecutive arcs share one point, so a valid string has an odd
/// number of at least three positions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Coord<f64>>"))]
pub struct CircularString(Vec<Coord<f64>>);

impl CircularString {
    pub fn new(control_points: Vec<Coord<f64>>) -> Result<Self> {
        let n = control_points.len();
        if n < 3 || n % 2 == 0 {
            return Err(EncodeError::InvalidGeometry(format!(
                "circular string needs an odd number (>= 3) of control points, got {}",
                n
            )));
        }
        Ok(Self(control_points))
    }

    #[inline]
    pub fn control_points(&self) -> &[Coord<f64>] {
        &self.0
    }

    fn first(&self) -> Coord<f64> {
        self.0[0]
    }

    fn last(&self) -> Coord<f64> {
        self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<Coord<f64>>> for CircularString {
    type Error = EncodeError;

    fn try_from(control_points: Vec<Coord<f64>>) -> Result<Self> {
        Self::new(control_points)
    }
}

/// One piece of a compound curve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CurveSegment {
    Linear(LineString<f64>),
    Circular(CircularString),
}

impl CurveSegment {
    /// Positions of this segment, control points for arcs
    pub fn coords(&self) -> &[Coord<f64>] {
        match self {
            CurveSegment::Linear(line) => &line.0,
            CurveSegment::Circular(arc) => arc.control_points(),
        }
    }
}

/// Connected linear and circular segments
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<CurveSegment>"))]
pub struct CompoundCurve(Vec<CurveSegment>);

impl CompoundCurve {
    /// Segments must be non-empty and each must start where the previous ends
    pub fn new(segments: Vec<CurveSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(EncodeError::InvalidGeometry(
                "compound curve has no segments".to_string(),
            ));
        }
        for (i, segment) in segments.iter().enumerate() {
            if segment.coords().len() < 2 {
                return Err(EncodeError::InvalidGeometry(format!(
                    "compound curve segment {} has fewer than 2 positions",
                    i
                )));
            }
        }
        for (i, pair) in segments.windows(2).enumerate() {
            let end = pair[0].coords()[pair[0].coords().len() - 1];
            let start = pair[1].coords()[0];
            if end != start {
                return Err(EncodeError::InvalidGeometry(format!(
                    "compound curve segment {} does not start where segment {} ends",
                    i + 1,
                    i
                )));
            }
        }
        Ok(Self(segments))
    }

    #[inline]
    pub fn segments(&self) -> &[CurveSegment] {
        &self.0
    }

    fn first(&self) -> Coord<f64> {
        self.0[0].coords()[0]
    }

    fn last(&self) -> Coord<f64> {
        let coords = self.0[self.0.len() - 1].coords();
        coords[coords.len() - 1]
    }
}

impl TryFrom<Vec<CurveSegment>> for CompoundCurve {
    type Error = EncodeError;

    fn try_from(segments: Vec<CurveSegment>) -> Result<Self> {
        Self::new(segments)
    }
}

/// A closed circular string
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CircularString"))]
pub struct CircularRing(CircularString);

impl CircularRing {
    pub fn new(arcs: CircularString) -> Result<Self> {
        if arcs.first() != arcs.last() {
            return Err(EncodeError::InvalidGeometry(
                "circular ring is not closed".to_string(),
            ));
        }
        Ok(Self(arcs))
    }

    #[inline]
    pub fn arcs(&self) -> &CircularString {
        &self.0
    }
}

impl TryFrom<CircularString> for CircularRing {
    type Error = EncodeError;

    fn try_from(arcs: CircularString) -> Result<Self> {
        Self::new(arcs)
    }
}

/// A closed compound curve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CompoundCurve"))]
pub struct CompoundRing(CompoundCurve);

impl CompoundRing {
    pub fn new(curve: CompoundCurve) -> Result<Self> {
        if curve.first() != curve.last() {
            return Err(EncodeError::InvalidGeometry(
                "compound ring is not closed".to_string(),
            ));
        }
        Ok(Self(curve))
    }

    #[inline]
    pub fn curve(&self) -> &CompoundCurve {
        &self.0
    }
}

impl TryFrom<CompoundCurve> for CompoundRing {
    type Error = EncodeError;

    fn try_from(curve: CompoundCurve) -> Result<Self> {
        Self::new(curve)
    }
}

/// A geometry value tagged with its shape kind
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    Point(Point<f64>),
    MultiPoint(MultiPoint<f64>),
    LineString(LineString<f64>),
    LinearRing(LinearRing),
    MultiLineString(MultiLineString<f64>),
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
    CircularString(CircularString),
    CompoundCurve(CompoundCurve),
    CircularRing(CircularRing),
    CompoundRing(CompoundRing),
}

impl Geometry {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::MultiPoint(_) => ShapeKind::MultiPoint,
            Geometry::LineString(_) => ShapeKind::LineString,
            Geometry::LinearRing(_) => ShapeKind::LinearRing,
            Geometry::MultiLineString(_) => ShapeKind::MultiLineString,
            Geometry::Polygon(_) => ShapeKind::Polygon,
            Geometry::MultiPolygon(_) => ShapeKind::MultiPolygon,
            Geometry::CircularString(_) => ShapeKind::CircularString,
            Geometry::CompoundCurve(_) => ShapeKind::CompoundCurve,
            Geometry::CircularRing(_) => ShapeKind::CircularRing,
            Geometry::CompoundRing(_) => ShapeKind::CompoundRing,
        }
    }

    /// Number of ordinates per position
    #[inline]
    pub fn dimension(&self) -> u32 {
        2
    }

    /// Bounding box, or `None` for an empty geometry
    ///
    /// Arcs contribute every axis extreme of their circle they sweep through,
    /// so the box contains the curve and not only its control points.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Geometry::Point(point) => Some(point.bounding_rect()),
            Geometry::MultiPoint(points) => points.bounding_rect(),
            Geometry::LineString(line) => line.bounding_rect(),
            Geometry::LinearRing(ring) => ring.line().bounding_rect(),
            Geometry::MultiLineString(lines) => lines.bounding_rect(),
            Geometry::Polygon(polygon) => polygon.bounding_rect(),
            Geometry::MultiPolygon(polygons) => polygons.bounding_rect(),
            Geometry::CircularString(arcs) => rect_of(arc_points(arcs)),
            Geometry::CompoundCurve(curve) => {
                rect_of(curve.segments().iter().flat_map(segment_points))
            }
            Geometry::CircularRing(ring) => rect_of(arc_points(ring.arcs())),
            Geometry::CompoundRing(ring) => {
                rect_of(ring.curve().segments().iter().flat_map(segment_points))
            }
        }
    }
}

/// Control points of a circular string plus the extremes its arcs reach
fn arc_points(arcs: &CircularString) -> impl Iterator<Item = Coord<f64>> + '_ {
    let points = arcs.control_points();
    points
        .windows(3)
        .step_by(2)
        .flat_map(|arc| arc_extremes(arc[0], arc[1], arc[2]).into_iter().flatten())
        .chain(points.iter().copied())
}

fn segment_points<'a>(segment: &'a CurveSegment) -> Box<dyn Iterator<Item = Coord<f64>> + 'a> {
    match segment {
        CurveSegment::Linear(line) => Box::new(line.0.iter().copied()),
        CurveSegment::Circular(arcs) => Box::new(arc_points(arcs)),
    }
}

/// Points at 0, 90, 180 and 270 degrees on the circle through `start`, `mid`
/// and `end` that lie on the arc from `start` to `end` passing `mid`
///
/// An arc whose end meets its start is the full circle with `mid` opposite
/// the start. Collinear control points describe a straight segment, which
/// has no extremes of its own.
fn arc_extremes(
    start: Coord<f64>,
    mid: Coord<f64>,
    end: Coord<f64>,
) -> [Option<Coord<f64>>; 4] {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    let full_circle = start == end;
    let (center, radius) = if full_circle {
        let center = Coord {
            x: (start.x + mid.x) / 2.0,
            y: (start.y + mid.y) / 2.0,
        };
        (center, (mid.x - start.x).hypot(mid.y - start.y) / 2.0)
    } else {
        let d = 2.0
            * (start.x * (mid.y - end.y) + mid.x * (end.y - start.y) + end.x * (start.y - mid.y));
        if d == 0.0 {
            return [None; 4];
        }
        let s2 = start.x * start.x + start.y * start.y;
        let m2 = mid.x * mid.x + mid.y * mid.y;
        let e2 = end.x * end.x + end.y * end.y;
        let center = Coord {
            x: (s2 * (mid.y - end.y) + m2 * (end.y - start.y) + e2 * (start.y - mid.y)) / d,
            y: (s2 * (end.x - mid.x) + m2 * (start.x - end.x) + e2 * (mid.x - start.x)) / d,
        };
        (center, (start.x - center.x).hypot(start.y - center.y))
    };
    if !center.x.is_finite() || !center.y.is_finite() || !radius.is_finite() {
        return [None; 4];
    }

    let angle = |c: Coord<f64>| (c.y - center.y).atan2(c.x - center.x);
    // Counter-clockwise distance from the start angle, in [0, TAU)
    let from_start = |theta: f64| (theta - angle(start)).rem_euclid(TAU);
    let to_end = from_start(angle(end));
    let counter_clockwise = from_start(angle(mid)) <= to_end;
    let on_arc = |theta: f64| {
        if full_circle {
            return true;
        }
        let swept = from_start(theta);
        if counter_clockwise {
            swept <= to_end
        } else {
            swept == 0.0 || swept >= to_end
        }
    };

    let axes = [
        (0.0, (radius, 0.0)),
        (FRAC_PI_2, (0.0, radius)),
        (PI, (-radius, 0.0)),
        (3.0 * FRAC_PI_2, (0.0, -radius)),
    ];
    axes.map(|(theta, (dx, dy))| {
        on_arc(theta).then(|| Coord {
            x: center.x + dx,
            y: center.y + dy,
        })
    })
}

fn rect_of(coords: impl Iterator<Item = Coord<f64>>) -> Option<Rect<f64>> {
    let mut bounds: Option<(Coord<f64>, Coord<f64>)> = None;
    for c in coords {
        bounds = Some(match bounds {
            None => (c, c),
            Some((min, max)) => (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            ),
        });
    }
    bounds.map(|(min, max)| Rect::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string, point, polygon};

    fn arc() -> CircularString {
        CircularString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 0.0 },
        ])
        .unwrap()
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Geometry::Point(point!(x: 1.0, y: 2.0)).kind(), ShapeKind::Point);
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(Geometry::Polygon(square).kind(), ShapeKind::Polygon);
        assert_eq!(Geometry::CircularString(arc()).kind(), ShapeKind::CircularString);
    }

    #[test]
    fn test_shape_kind_all_is_unique() {
        let set: std::collections::HashSet<ShapeKind> = ShapeKind::ALL.into_iter().collect();
        assert_eq!(set.len(), ShapeKind::ALL.len());
        assert_eq!(ShapeKind::ALL.iter().filter(|k| k.is_curve()).count(), 4);
    }

    #[test]
    fn test_linear_ring_requires_closure() {
        let open = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        assert!(matches!(LinearRing::new(open), Err(EncodeError::InvalidGeometry(_))));

        let closed = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        assert!(LinearRing::new(closed).is_ok());
    }

    #[test]
    fn test_circular_string_needs_odd_count() {
        let even = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }];
        assert!(CircularString::new(even).is_err());
        assert_eq!(arc().control_points().len(), 3);
    }

    #[test]
    fn test_compound_curve_requires_connected_segments() {
        let connected = vec![
            CurveSegment::Circular(arc()),
            CurveSegment::Linear(line_string![(x: 2.0, y: 0.0), (x: 4.0, y: 0.0)]),
        ];
        assert!(CompoundCurve::new(connected).is_ok());

        let gap = vec![
            CurveSegment::Circular(arc()),
            CurveSegment::Linear(line_string![(x: 3.0, y: 0.0), (x: 4.0, y: 0.0)]),
        ];
        assert!(CompoundCurve::new(gap).is_err());
        assert!(CompoundCurve::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rings_must_close() {
        assert!(CircularRing::new(arc()).is_err());

        let closed = CircularString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 0.0 },
            coord! { x: 1.0, y: -1.0 },
            coord! { x: 0.0, y: 0.0 },
        ])
        .unwrap();
        assert!(CircularRing::new(closed).is_ok());
    }

    #[test]
    fn test_bounding_rect() {
        let geometry = Geometry::CircularString(arc());
        let rect = geometry.bounding_rect().unwrap();
        assert_eq!(rect.min(), coord! { x: 0.0, y: 0.0 });
        assert_eq!(rect.max(), coord! { x: 2.0, y: 1.0 });

        let empty = Geometry::MultiPoint(MultiPoint::new(Vec::new()));
        assert!(empty.bounding_rect().is_none());
    }

    fn assert_close(actual: Coord<f64>, expected: Coord<f64>) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_arc_bounds_include_the_bulge() {
        // Three quarters of the unit circle, clockwise from (-1, 0) over the top
        let arcs = CircularString::new(vec![
            coord! { x: -1.0, y: 0.0 },
            coord! { x: 0.6, y: 0.8 },
            coord! { x: 0.0, y: -1.0 },
        ])
        .unwrap();
        let rect = Geometry::CircularString(arcs.clone()).bounding_rect().unwrap();
        assert_close(rect.min(), coord! { x: -1.0, y: -1.0 });
        assert_close(rect.max(), coord! { x: 1.0, y: 1.0 });

        // The same end points the short way round stay in the lower left quadrant
        let short = CircularString::new(vec![
            coord! { x: -1.0, y: 0.0 },
            coord! { x: -0.6, y: -0.8 },
            coord! { x: 0.0, y: -1.0 },
        ])
        .unwrap();
        let rect = Geometry::CircularString(short).bounding_rect().unwrap();
        assert_close(rect.min(), coord! { x: -1.0, y: -1.0 });
        assert_close(rect.max(), coord! { x: 0.0, y: 0.0 });

        let curve = CompoundCurve::new(vec![
            CurveSegment::Circular(arcs),
            CurveSegment::Linear(line_string![(x: 0.0, y: -1.0), (x: 0.0, y: -3.0)]),
        ])
        .unwrap();
        let rect = Geometry::CompoundCurve(curve).bounding_rect().unwrap();
        assert_close(rect.min(), coord! { x: -1.0, y: -3.0 });
        assert_close(rect.max(), coord! { x: 1.0, y: 1.0 });
    }

    #[test]
    fn test_full_circle_bounds() {
        let circle = CircularString::new(vec![
            coord! { x: 2.0, y: 0.0 },
            coord! { x: 4.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        ])
        .unwrap();
        let rect = Geometry::CircularRing(CircularRing::new(circle).unwrap())
            .bounding_rect()
            .unwrap();
        assert_close(rect.min(), coord! { x: 2.0, y: -1.0 });
        assert_close(rect.max(), coord! { x: 4.0, y: 1.0 });
    }

    #[test]
    fn test_collinear_arc_is_bounded_by_its_points() {
        let flat = CircularString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 2.0 },
        ])
        .unwrap();
        let rect = Geometry::CircularString(flat).bounding_rect().unwrap();
        assert_eq!(rect.min(), coord! { x: 0.0, y: 0.0 });
        assert_eq!(rect.max(), coord! { x: 2.0, y: 2.0 });
    }
}

//! Spatial predicates as `geo_shape`, `geo_bounding_box`, `geo_polygon` and
//! `geo_distance` queries.

use crate::errors::EncodeError;
use crate::query::{LonLat, QueryFragment, ShapeRelation};
use geo::{BoundingRect, Centroid, HasDimensions};
use geo_types::{Coord, Geometry, LineString, Polygon, Rect};
use ogc_filter::{Distance, GeometryKind, SpatialOp};
use serde_json::{json, Value};
use strum::{Display, EnumString};

/// Distance units understood by `geo_distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DistanceUnit {
    #[strum(to_string = "m", serialize = "meters", serialize = "meter", serialize = "metres", serialize = "metre")]
    Meters,
    #[strum(to_string = "km", serialize = "kilometers", serialize = "kilometer", serialize = "kilometres", serialize = "kilometre")]
    Kilometers,
    #[strum(to_string = "cm", serialize = "centimeters", serialize = "centimeter")]
    Centimeters,
    #[strum(to_string = "mm", serialize = "millimeters", serialize = "millimeter")]
    Millimeters,
    #[strum(to_string = "mi", serialize = "miles", serialize = "mile", serialize = "statute miles")]
    Miles,
    #[strum(to_string = "yd", serialize = "yards", serialize = "yard")]
    Yards,
    #[strum(to_string = "ft", serialize = "feet", serialize = "foot")]
    Feet,
    #[strum(to_string = "in", serialize = "inches", serialize = "inch")]
    Inches,
    #[strum(to_string = "nmi", serialize = "nauticalmiles", serialize = "nautical miles", serialize = "NM")]
    NauticalMiles,
}

/// Renders a distance as `geo_distance` expects it, e.g. `1.0m`.
pub fn format_distance(distance: &Distance) -> Result<String, EncodeError> {
    let unit: DistanceUnit = distance.units.trim().parse().map_err(|_| {
        EncodeError::invalid(format!("unknown distance unit '{}'", distance.units))
    })?;
    Ok(format!("{:?}{}", distance.value, unit))
}

/// Result of reducing a geometry literal before translation.
#[derive(Debug, Clone, PartialEq)]
enum Normalized {
    Empty,
    /// Covers every longitude and latitude.
    World,
    Geometry(Geometry<f64>),
}

fn covers_world(geometry: &Geometry<f64>) -> bool {
    if !matches!(
        geometry,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_)
    ) {
        return false;
    }
    geometry.bounding_rect().is_some_and(|rect| {
        rect.min().x <= -180.0 && rect.max().x >= 180.0 && rect.min().y <= -90.0 && rect.max().y >= 90.0
    })
}

fn world_envelope() -> Rect<f64> {
    Rect::new(Coord { x: -180.0, y: -90.0 }, Coord { x: 180.0, y: 90.0 })
}

fn normalize(geometry: &Geometry<f64>) -> Normalized {
    if geometry.is_empty() {
        return Normalized::Empty;
    }
    if covers_world(geometry) {
        return Normalized::World;
    }
    let Geometry::GeometryCollection(collection) = geometry else {
        return Normalized::Geometry(geometry.clone());
    };

    // world-covering members add no constraint next to other members
    let mut saw_world = false;
    let mut kept = Vec::new();
    for member in collection.iter() {
        match normalize(member) {
            Normalized::Empty => {}
            Normalized::World => saw_world = true,
            Normalized::Geometry(g) => kept.push(g),
        }
    }
    if kept.is_empty() {
        return if saw_world && collection.iter().all(covers_world) {
            Normalized::World
        } else {
            Normalized::Empty
        };
    }
    if kept.len() == 1 {
        return Normalized::Geometry(kept.remove(0));
    }
    Normalized::Geometry(Geometry::GeometryCollection(kept.into()))
}

fn lon_lat(coord: Coord<f64>) -> LonLat {
    [coord.x, coord.y]
}

fn line_coordinates(line: &LineString<f64>) -> Value {
    Value::Array(line.coords().map(|c| json!(lon_lat(*c))).collect())
}

fn polygon_coordinates(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![line_coordinates(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(line_coordinates));
    Value::Array(rings)
}

/// Closed ring starting at the lower-left corner, going up first.
fn envelope_polygon(rect: &Rect<f64>) -> Polygon<f64> {
    let (min, max) = (rect.min(), rect.max());
    Polygon::new(
        LineString::from(vec![
            (min.x, min.y),
            (min.x, max.y),
            (max.x, max.y),
            (max.x, min.y),
            (min.x, min.y),
        ]),
        vec![],
    )
}

/// GeoJSON representation used in `geo_shape` queries.
pub fn to_geojson(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Point(p) => json!({"type": "Point", "coordinates": lon_lat(p.0)}),
        Geometry::Line(line) => json!({
            "type": "LineString",
            "coordinates": [lon_lat(line.start), lon_lat(line.end)]
        }),
        Geometry::LineString(line) => {
            json!({"type": "LineString", "coordinates": line_coordinates(line)})
        }
        Geometry::Polygon(polygon) => {
            json!({"type": "Polygon", "coordinates": polygon_coordinates(polygon)})
        }
        Geometry::MultiPoint(points) => json!({
            "type": "MultiPoint",
            "coordinates": points.iter().map(|p| lon_lat(p.0)).collect::<Vec<_>>()
        }),
        Geometry::MultiLineString(lines) => json!({
            "type": "MultiLineString",
            "coordinates": lines.iter().map(line_coordinates).collect::<Vec<_>>()
        }),
        Geometry::MultiPolygon(polygons) => json!({
            "type": "MultiPolygon",
            "coordinates": polygons.iter().map(polygon_coordinates).collect::<Vec<_>>()
        }),
        Geometry::GeometryCollection(collection) => json!({
            "type": "GeometryCollection",
            "geometries": collection.iter().map(to_geojson).collect::<Vec<_>>()
        }),
        Geometry::Rect(rect) => to_geojson(&Geometry::Polygon(envelope_polygon(rect))),
        Geometry::Triangle(triangle) => to_geojson(&Geometry::Polygon(triangle.to_polygon())),
    }
}

fn geo_shape(field: &str, geometry: &Geometry<f64>, relation: ShapeRelation) -> QueryFragment {
    QueryFragment::filtered(QueryFragment::GeoShape {
        field: field.to_string(),
        shape: to_geojson(geometry),
        relation,
    })
}

fn relation_for(op: SpatialOp) -> Option<ShapeRelation> {
    match op {
        SpatialOp::BBox | SpatialOp::Intersects | SpatialOp::Disjoint => {
            Some(ShapeRelation::Intersects)
        }
        SpatialOp::Within => Some(ShapeRelation::Within),
        SpatialOp::Contains => Some(ShapeRelation::Contains),
        _ => None,
    }
}

/// Translates a spatial predicate between the attribute `field` and a
/// geometry literal. Operand order does not matter.
pub fn translate_spatial(
    op: SpatialOp,
    field: &str,
    kind: GeometryKind,
    geometry: &Geometry<f64>,
    distance: Option<&Distance>,
) -> Result<QueryFragment, EncodeError> {
    if matches!(
        op,
        SpatialOp::Crosses | SpatialOp::Touches | SpatialOp::Overlaps | SpatialOp::Equals
    ) {
        return Err(EncodeError::unsupported(format!(
            "{} has no Elasticsearch translation",
            op
        )));
    }

    let negated = matches!(op, SpatialOp::Disjoint | SpatialOp::Beyond);
    let geometry = match normalize(geometry) {
        Normalized::Empty => {
            tracing::debug!("{} against an empty geometry", op);
            return Ok(if negated {
                QueryFragment::match_all()
            } else {
                QueryFragment::match_none()
            });
        }
        Normalized::World if op != SpatialOp::Contains => {
            tracing::debug!("{} against a geometry covering the world", op);
            return Ok(if negated {
                QueryFragment::match_none()
            } else {
                QueryFragment::match_all()
            });
        }
        // out of range coordinates are clamped to the valid domain
        Normalized::World => Geometry::Polygon(envelope_polygon(&world_envelope())),
        Normalized::Geometry(g) => g,
    };

    let positive = match op {
        SpatialOp::DWithin | SpatialOp::Beyond => {
            let distance = distance.ok_or_else(|| {
                EncodeError::invalid(format!("{} requires a distance", op))
            })?;
            distance_query(field, &geometry, distance)?
        }
        SpatialOp::BBox => {
            let envelope = geometry.bounding_rect().ok_or_else(|| {
                EncodeError::invalid("BBOX requires a non-empty envelope")
            })?;
            match kind {
                GeometryKind::Point => QueryFragment::filtered(QueryFragment::GeoBoundingBox {
                    field: field.to_string(),
                    top_left: [envelope.min().x, envelope.max().y],
                    bottom_right: [envelope.max().x, envelope.min().y],
                }),
                _ => geo_shape(
                    field,
                    &Geometry::Polygon(envelope_polygon(&envelope)),
                    ShapeRelation::Intersects,
                ),
            }
        }
        _ => {
            let relation = relation_for(op).ok_or_else(|| {
                EncodeError::unsupported(format!("{} has no Elasticsearch translation", op))
            })?;
            match (&geometry, kind, relation) {
                (Geometry::Polygon(polygon), GeometryKind::Point, ShapeRelation::Intersects)
                | (Geometry::Polygon(polygon), GeometryKind::Point, ShapeRelation::Within) => {
                    QueryFragment::filtered(QueryFragment::GeoPolygon {
                        field: field.to_string(),
                        points: polygon.exterior().coords().map(|c| lon_lat(*c)).collect(),
                    })
                }
                _ => geo_shape(field, &geometry, relation),
            }
        }
    };

    Ok(if negated {
        QueryFragment::must_not(positive)
    } else {
        positive
    })
}

fn distance_query(
    field: &str,
    geometry: &Geometry<f64>,
    distance: &Distance,
) -> Result<QueryFragment, EncodeError> {
    let center = match geometry {
        Geometry::Point(point) => *point,
        other => other
            .centroid()
            .ok_or_else(|| EncodeError::invalid("cannot compute the centroid of the geometry"))?,
    };
    Ok(QueryFragment::filtered(QueryFragment::GeoDistance {
        field: field.to_string(),
        distance: format_distance(distance)?,
        point: lon_lat(center.0),
    }))
}

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Value};

use crate::{
    error::{AmapError, Result},
    geom::orient,
    types::{AdminRecord, Layer, Properties},
};

fn ring_to_json(ring: &LineString<f64>) -> Value {
    json!(ring.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>())
}

fn polygon_rings(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![ring_to_json(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_to_json));
    Value::Array(rings)
}

/// GeoJSON geometry with exteriors counter-clockwise and holes clockwise.
/// A single-member multipolygon is written as a Polygon.
pub fn geometry_to_geojson(mp: &MultiPolygon<f64>) -> Result<Value> {
    let oriented = orient(mp);
    match oriented.0.as_slice() {
        [] => Err(AmapError::Decode("cannot serialize an empty geometry".into())),
        [polygon] => Ok(json!({
            "type": "Polygon",
            "coordinates": polygon_rings(polygon),
        })),
        polygons => Ok(json!({
            "type": "MultiPolygon",
            "coordinates": polygons.iter().map(polygon_rings).collect::<Vec<_>>(),
        })),
    }
}

fn ring_from_json(value: &Value) -> Result<LineString<f64>> {
    let points = value.as_array()
        .ok_or_else(|| AmapError::Decode("GeoJSON ring is not an array".into()))?;
    points.iter()
        .map(|point| match point.as_array().map(Vec::as_slice) {
            Some([x, y, ..]) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err(AmapError::Decode(format!("non-numeric GeoJSON position {point}"))),
            },
            _ => Err(AmapError::Decode(format!("malformed GeoJSON position {point}"))),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString)
}

fn polygon_from_json(value: &Value) -> Result<Polygon<f64>> {
    let rings = value.as_array()
        .ok_or_else(|| AmapError::Decode("GeoJSON polygon is not an array of rings".into()))?;
    let (exterior, interiors) = rings.split_first()
        .ok_or_else(|| AmapError::Decode("GeoJSON polygon has no rings".into()))?;
    Ok(Polygon::new(
        ring_from_json(exterior)?,
        interiors.iter().map(ring_from_json).collect::<Result<Vec<_>>>()?,
    ))
}

/// Read a GeoJSON Polygon or MultiPolygon geometry object.
pub fn geometry_from_geojson(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coordinates = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![polygon_from_json(coordinates)?])),
        Some("MultiPolygon") => coordinates.as_array()
            .ok_or_else(|| AmapError::Decode("GeoJSON multipolygon is not an array".into()))?
            .iter()
            .map(polygon_from_json)
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon),
        other => Err(AmapError::Decode(format!("unsupported GeoJSON geometry type {other:?}"))),
    }
}

pub fn record_to_feature<P: Properties>(record: &AdminRecord<P>) -> Result<Value> {
    Ok(json!({
        "type": "Feature",
        "geometry": geometry_to_geojson(&record.geometry)?,
        "properties": serde_json::to_value(&record.properties)?,
    }))
}

/// Export a layer as a GeoJSON FeatureCollection, one feature per record in
/// adcode order.
pub fn layer_to_geojson<P: Properties>(layer: &Layer<P>) -> Result<Value> {
    let features = layer.records.iter()
        .map(record_to_feature)
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

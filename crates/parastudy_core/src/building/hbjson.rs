//! HBJSON building models.
//!
//! The document is kept as a JSON tree so that everything this crate does
//! not touch is written back unchanged. Only exterior faces that carry
//! apertures are modified.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Value, json};

use super::DesignModel;
use super::geometry::{Point, Vector, centroid, polygon_normal, scale_about};
use crate::error::ModelError;

/// An HBJSON `Model` document
#[derive(Debug, Clone, PartialEq)]
pub struct HbModel {
    doc: Value,
}

impl HbModel {
    pub fn from_value(doc: Value) -> Result<Self, ModelError> {
        if doc.get("type").and_then(Value::as_str) != Some("Model") {
            return Err(ModelError::Malformed(
                "expected a document of type \"Model\"".to_string(),
            ));
        }
        Ok(Self { doc })
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.doc.get("identifier").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    /// Faces eligible for window and louver changes
    pub fn exterior_faces_with_apertures(&self) -> usize {
        faces(&self.doc)
            .into_iter()
            .filter(|f| is_exterior_with_apertures(f))
            .count()
    }

    /// Total number of apertures on all faces
    pub fn aperture_count(&self) -> usize {
        faces(&self.doc).into_iter().map(|f| apertures(f).len()).sum()
    }

    /// Total number of shades attached to apertures
    pub fn louver_count(&self) -> usize {
        faces(&self.doc)
            .into_iter()
            .flat_map(apertures)
            .map(|ap| {
                ap.get("outdoor_shades")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len)
            })
            .sum()
    }
}

impl FromStr for HbModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(serde_json::from_str(s)?)
    }
}

impl DesignModel for HbModel {
    fn extension(&self) -> &'static str {
        "hbjson"
    }

    fn set_window_to_wall_ratio(&mut self, ratio: f64) -> Result<(), ModelError> {
        if !(0.0..1.0).contains(&ratio) {
            return Err(ModelError::InvalidRatio(ratio));
        }

        for face in target_faces(&mut self.doc) {
            if ratio == 0.0 {
                face["apertures"] = json!([]);
                continue;
            }
            let face_id = identifier(face, "Face");
            let boundary = parse_boundary(&face["geometry"], &face_id)?;
            let center = centroid(&boundary)
                .ok_or_else(|| ModelError::Malformed(format!("face {face_id} has no vertices")))?;
            let glazing = scale_about(&boundary, center, ratio.sqrt());
            let aperture_id = format!("{face_id}_Glz0");
            face["apertures"] = json!([{
                "type": "Aperture",
                "identifier": aperture_id,
                "display_name": aperture_id,
                "geometry": face3d(&glazing),
                "is_operable": false,
                "boundary_condition": { "type": "Outdoors" },
                "properties": { "type": "AperturePropertiesAbridged" },
            }]);
        }
        Ok(())
    }

    fn add_louvers(&mut self, count: u32, depth: f64) -> Result<(), ModelError> {
        if count == 0 || !(depth > 0.0 && depth.is_finite()) {
            return Err(ModelError::InvalidLouvers { count, depth });
        }

        let up = Vector::new(0.0, 0.0, 1.0);
        for face in target_faces(&mut self.doc) {
            let face_id = identifier(face, "Face");
            let boundary = parse_boundary(&face["geometry"], &face_id)?;
            let normal = polygon_normal(&boundary)
                .ok_or_else(|| ModelError::Malformed(format!("face {face_id} is degenerate")))?;
            // Horizontal faces get no louvers
            let Some(along) = up.cross(normal).normalize() else {
                continue;
            };

            let Some(aps) = face.get_mut("apertures").and_then(Value::as_array_mut) else {
                continue;
            };
            for aperture in aps.iter_mut() {
                let aperture_id = identifier(aperture, "Aperture");
                let pts = parse_boundary(&aperture["geometry"], &aperture_id)?;
                let shades = louvers(&pts, along, normal, count, depth)
                    .into_iter()
                    .enumerate()
                    .map(|(i, louver)| {
                        json!({
                            "type": "Shade",
                            "identifier": format!("{aperture_id}_Louver{i}"),
                            "geometry": face3d(&louver),
                            "properties": { "type": "ShadePropertiesAbridged" },
                        })
                    });

                let slot = aperture
                    .as_object_mut()
                    .ok_or_else(|| {
                        ModelError::Malformed(format!("aperture {aperture_id} is not an object"))
                    })?
                    .entry("outdoor_shades")
                    .or_insert_with(|| json!([]));
                match slot.as_array_mut() {
                    Some(existing) => existing.extend(shades),
                    None => {
                        return Err(ModelError::Malformed(format!(
                            "aperture {aperture_id} has invalid outdoor_shades"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<(), ModelError> {
        let text = serde_json::to_string(&self.doc)?;
        fs::write(path, text).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Horizontal louvers evenly spaced down from the top edge of an opening
fn louvers(pts: &[Point], along: Vector, normal: Vector, count: u32, depth: f64) -> Vec<Vec<Point>> {
    let origin = pts[0];
    let (mut t_min, mut t_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut z_min, mut z_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &p in pts {
        let t = (p - origin).dot(along);
        t_min = t_min.min(t);
        t_max = t_max.max(t);
        z_min = z_min.min(p.z);
        z_max = z_max.max(p.z);
    }

    let spacing = (z_max - z_min) / count as f64;
    let out = normal * depth;
    (0..count)
        .map(|i| {
            let z = z_max - spacing * i as f64;
            let start = Point::new(origin.x, origin.y, z) + along * t_min;
            let end = Point::new(origin.x, origin.y, z) + along * t_max;
            vec![start, end, end + out, start + out]
        })
        .collect()
}

fn faces(doc: &Value) -> Vec<&Value> {
    let mut all = Vec::new();
    if let Some(rooms) = doc.get("rooms").and_then(Value::as_array) {
        for room in rooms {
            if let Some(fs) = room.get("faces").and_then(Value::as_array) {
                all.extend(fs.iter());
            }
        }
    }
    if let Some(fs) = doc.get("orphaned_faces").and_then(Value::as_array) {
        all.extend(fs.iter());
    }
    all
}

fn target_faces(doc: &mut Value) -> Vec<&mut Value> {
    let mut all = Vec::new();
    let Some(obj) = doc.as_object_mut() else {
        return all;
    };
    for (key, value) in obj.iter_mut() {
        match (key.as_str(), value.as_array_mut()) {
            ("rooms", Some(rooms)) => {
                for room in rooms {
                    if let Some(fs) = room.get_mut("faces").and_then(Value::as_array_mut) {
                        all.extend(fs.iter_mut());
                    }
                }
            }
            ("orphaned_faces", Some(fs)) => all.extend(fs.iter_mut()),
            _ => {}
        }
    }
    all.retain(|f| is_exterior_with_apertures(f));
    all
}

fn apertures(face: &Value) -> &[Value] {
    face.get("apertures")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn is_exterior_with_apertures(face: &Value) -> bool {
    let outdoors = face
        .get("boundary_condition")
        .and_then(|bc| bc.get("type"))
        .and_then(Value::as_str)
        == Some("Outdoors");
    outdoors && !apertures(face).is_empty()
}

fn identifier(obj: &Value, fallback: &str) -> String {
    obj.get("identifier")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

fn parse_boundary(geometry: &Value, owner: &str) -> Result<Vec<Point>, ModelError> {
    let malformed = || ModelError::Malformed(format!("{owner} has an invalid boundary"));
    let vertices = geometry
        .get("boundary")
        .and_then(Value::as_array)
        .ok_or_else(malformed)?;
    let pts = vertices
        .iter()
        .map(|v| {
            let coords: Vec<f64> = v
                .as_array()
                .ok_or_else(malformed)?
                .iter()
                .map(|c| c.as_f64().ok_or_else(malformed))
                .collect::<Result<_, _>>()?;
            match coords.as_slice() {
                [x, y, z] => Ok(Point::new(*x, *y, *z)),
                _ => Err(malformed()),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    if pts.len() < 3 {
        return Err(malformed());
    }
    Ok(pts)
}

fn face3d(pts: &[Point]) -> Value {
    let boundary: Vec<[f64; 3]> = pts.iter().map(|p| p.to_array()).collect();
    json!({ "type": "Face3D", "boundary": boundary })
}

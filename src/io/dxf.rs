//! DXF drawings as batch records.
//!
//! - `Polyline` and `LwPolyline` entities become line records, or area records when the
//!   entity is flagged closed or the chain closes on itself. `LwPolyline` vertices sit at
//!   the entity elevation.
//! - All `Face3D` entities become a single mesh record, with one sub-mesh per layer.
//!
//! The entity layer is attached as the `attrib_layer` string attribute.
use super::*;
use ::dxf::entities::{EntityType, Face3D};
use rustc_hash::FxHashMap as HashMap;

/// Attribute name the entity layer is written under.
pub const LAYER_ATTR: &str = "attrib_layer";

/// Read the records of a DXF drawing.
pub fn records_from_dxf(dxf: &[u8]) -> Result<Vec<Record>> {
    let dxf =
        ::dxf::Drawing::load(&mut Cursor::new(dxf)).map_err(|e| format!("{:?} ==> {}", e, e))?;

    let mut records = Vec::new();
    let mut faces = FaceLayers::default();

    for e in dxf.entities() {
        let layer = e.common.layer.as_str();
        let (pts, closed): (Vec<Point3>, _) = match &e.specific {
            EntityType::LwPolyline(p) => (
                p.vertices.iter().map(|v| [v.x, v.y, p.elevation]).collect(),
                p.is_closed(),
            ),
            EntityType::Polyline(p) => (
                p.vertices().map(|v| from_dxf_point(&v.location)).collect(),
                p.is_closed(),
            ),
            EntityType::Face3D(f) => {
                faces.push(layer, f);
                continue;
            }
            _ => {
                log::trace!("skipping unsupported dxf entity on layer '{}'", layer);
                continue;
            }
        };

        match chain_record(pts, closed) {
            Some(r) => records.push(r.with_attr(LAYER_ATTR, layer)),
            None => log::warn!("skipping degenerate polyline on layer '{}'", layer),
        }
    }

    if let Some(mesh) = faces.into_record()? {
        records.push(mesh);
    }

    Ok(records)
}

fn chain_record(pts: Vec<Point3>, closed: bool) -> Option<Record> {
    let line = Polyline3::new(pts).ok()?;
    if closed || line.is_closed() {
        Polygon3::new(line).ok().map(Record::area)
    } else {
        Some(Record::line(line))
    }
}

/// Face3D corners grouped by layer, in first seen order.
#[derive(Default)]
struct FaceLayers {
    lookup: HashMap<String, usize>,
    layers: Vec<(String, Vec<Point3>, Vec<Face>)>,
}

impl FaceLayers {
    fn push(&mut self, layer: &str, face: &Face3D) {
        let Face3D {
            first_corner: a,
            second_corner: b,
            third_corner: c,
            fourth_corner: d,
            ..
        } = face;

        let mut corners = vec![from_dxf_point(a), from_dxf_point(b), from_dxf_point(c)];
        // a triangle repeats a corner as the fourth
        let d = from_dxf_point(d);
        if !corners.iter().any(|&p| same_point(p, d)) {
            corners.push(d);
        }

        let i = *self.lookup.entry(layer.to_string()).or_insert_with(|| {
            self.layers.push((layer.to_string(), Vec::new(), Vec::new()));
            self.layers.len() - 1
        });
        let (_, vertices, faces) = &mut self.layers[i];
        let start = vertices.len() as u32;
        faces.push((start..start + corners.len() as u32).collect());
        vertices.extend(corners);
    }

    fn into_record(self) -> Result<Option<Record>> {
        if self.layers.is_empty() {
            return Ok(None);
        }

        let names = self
            .layers
            .iter()
            .map(|(name, _, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let parts = self
            .layers
            .into_iter()
            .map(|(_, vertices, faces)| SubMesh::new(vertices, faces))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(Record::mesh(Mesh::new(parts)?).with_attr(LAYER_ATTR, names)))
    }
}

/// Write polylines to a DXF drawing.
pub fn to_dxf<'a, I>(lines: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Polyline3>,
{
    let mut d = ::dxf::Drawing::new();

    for line in lines {
        let polyline = to_polyline(&mut d, line.pts().iter().copied());
        d.add_entity(::dxf::entities::Entity::new(EntityType::Polyline(polyline)));
    }

    d.normalize();
    let mut buf = Vec::new();
    d.save(&mut buf).map_err(|e| format!("{:?} ==> {}", e, e))?;

    Ok(buf)
}

//! Data interop.
//! Reads records out of DXF drawings and writes documents out.
use crate::*;
use std::{
    error::Error,
    io::{Cursor, Write},
};

pub mod dxf;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Stream a document, in compact form, to a writer.
pub fn write_document<W: Write>(doc: &Document, mut writer: W) -> Result<()> {
    serde_json::to_writer(&mut writer, doc.to_value())?;
    writer.flush()?;
    Ok(())
}

fn to_dxf_point(p: Point3) -> ::dxf::Point {
    let [x, y, z] = p;
    ::dxf::Point { x, y, z }
}

fn from_dxf_point(p: &::dxf::Point) -> Point3 {
    [p.x, p.y, p.z]
}

fn to_polyline(
    drawing: &mut ::dxf::Drawing,
    ps: impl Iterator<Item = Point3>,
) -> ::dxf::entities::Polyline {
    let mut polyline = ::dxf::entities::Polyline::default();

    let vertices = ps.map(to_dxf_point).map(::dxf::entities::Vertex::new);

    for vertex in vertices {
        polyline.add_vertex(drawing, vertex);
    }

    polyline.set_is_3d_polyline(true);

    polyline
}

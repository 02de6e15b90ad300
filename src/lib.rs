//! Geometry records to Houdini `.geo` documents.
//!
//! Records are accumulated into a [`Batch`], then flushed into [`Document`]s: the
//! alternating key/value tree of the geometry schema. Points are centred on the batch
//! centroid and converted from Z-up to Y-up on the way through.
#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod assemble;
pub mod attribute;
mod batch;
pub mod document;
mod extents;
#[cfg(feature = "io")]
pub mod io;
mod mesh;
mod normalize;
mod options;
mod point;
pub mod polygon;
mod polyline;
mod record;
pub mod remap;
pub mod rle;

pub use assemble::*;
pub use attribute::*;
pub use batch::*;
pub use document::*;
pub use extents::*;
pub use mesh::*;
pub use normalize::*;
pub use options::*;
pub use point::*;
pub use polygon::*;
pub use polyline::*;
pub use record::*;
pub use remap::*;
pub use rle::*;

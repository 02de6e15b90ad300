//! Primitive assemblers.
//! Each assembler buffers records of one kind and builds their document in one pass.
use crate::*;

mod area;
mod line;
mod mesh;
mod point;

pub use area::AreaAssembler;
pub use line::LineAssembler;
pub use mesh::MeshAssembler;
pub use point::PointAssembler;

pub trait Assembler {
    /// The record kind consumed.
    fn kind(&self) -> Kind;

    /// The buffered records, in ingestion order.
    fn records(&self) -> &[Record];

    /// Buffer a record. No geometry math is done until [`Assembler::build`].
    fn push(&mut self, record: Record);

    /// Build the document, with every point transformed by `frame`.
    fn build(&self, frame: &Frame, opts: &Options) -> Document;

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// The bounding volume of all buffered geometry.
    fn bounds(&self) -> Extents3 {
        self.records().iter().map(|r| r.geometry.aabb()).collect()
    }

    /// A builder with the shared batch parts set: bounds and the spatial reference.
    fn begin(&self, frame: &Frame, opts: &Options) -> DocumentBuilder {
        let mut b = DocumentBuilder::new(opts, frame.bounds);
        if opts.spatial_reference {
            let cs = self.records().iter().find_map(|r| r.coord_sys.as_deref());
            b.set_spatial_ref(frame, cs);
        }
        b
    }
}

/// Attribute columns for one scope, templated from the first record of a batch.
///
/// Only attributes named with the prefix are kept, and only those with an integer, float or
/// string class. Every later record contributes one value per column; a record lacking the
/// attribute contributes the type default.
#[derive(Clone, Debug)]
pub struct AttributeSet {
    columns: Vec<(String, Attribute)>,
}

impl AttributeSet {
    pub fn template(record: &Record, scope: Scope, prefix: &str) -> Self {
        let columns = record
            .attributes
            .iter()
            .filter_map(|(name, field)| {
                let short = name.strip_prefix(prefix)?;
                if short.is_empty() {
                    return None;
                }
                match field.attr_type() {
                    Some(ty) => Some((name.clone(), Attribute::empty(short, scope, ty))),
                    None => {
                        log::trace!("dropping attribute '{}' with unsupported class", name);
                        None
                    }
                }
            })
            .collect();

        Self { columns }
    }

    /// Template from the first record then push every record.
    pub fn collect<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        scope: Scope,
        prefix: &str,
    ) -> Self {
        let mut records = records.into_iter().peekable();
        let mut set = match records.peek() {
            Some(first) => Self::template(first, scope, prefix),
            None => return Self { columns: Vec::new() },
        };
        for r in records {
            set.push(r);
        }
        set
    }

    pub fn push(&mut self, record: &Record) {
        for (name, attr) in &mut self.columns {
            attr.push(record.attr(name).map_or(Value::Null, Field::value));
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.columns.iter().map(|(_, a)| a)
    }
}

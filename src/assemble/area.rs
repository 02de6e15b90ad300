use super::*;

/// Closed polygons. The closing duplicate of each boundary is not written.
#[derive(Clone, Debug, Default)]
pub struct AreaAssembler {
    records: Vec<Record>,
}

impl AreaAssembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Assembler for AreaAssembler {
    fn kind(&self) -> Kind {
        Kind::Area
    }

    fn records(&self) -> &[Record] {
        &self.records
    }

    fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    fn build(&self, frame: &Frame, opts: &Options) -> Document {
        let mut points = Vec::new();
        let mut counts = Vec::with_capacity(self.records.len());
        for r in &self.records {
            if let Geometry::Area(area) = &r.geometry {
                let ring = area.ring();
                points.extend_from_slice(ring);
                counts.push(ring.len());
            }
        }

        let attrs = AttributeSet::collect(&self.records, Scope::Primitive, &opts.attribute_prefix);

        let mut b = self.begin(frame, opts);
        b.set_indices(0..points.len() as u32);
        b.set_points(frame.apply_all(&points));
        b.set_primitives(Primitives::Polygons(counts));
        b.add_attributes(attrs.attributes());
        b.build()
    }
}

use super::*;

/// Open curves: one vertex chain per record, attributes at primitive scope.
#[derive(Clone, Debug, Default)]
pub struct LineAssembler {
    records: Vec<Record>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Assembler for LineAssembler {
    fn kind(&self) -> Kind {
        Kind::Line
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
            if let Geometry::Line(line) = &r.geometry {
                points.extend_from_slice(line.pts());
                counts.push(line.len());
            }
        }

        let attrs = AttributeSet::collect(&self.records, Scope::Primitive, &opts.attribute_prefix);

        let mut b = self.begin(frame, opts);
        b.set_indices(0..points.len() as u32);
        b.set_points(frame.apply_all(&points));
        b.set_primitives(Primitives::Curves(counts));
        b.add_attributes(attrs.attributes());
        b.build()
    }
}

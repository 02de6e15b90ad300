use super::*;

/// A point cloud: one point per record, attributes at point scope.
#[derive(Clone, Debug, Default)]
pub struct PointAssembler {
    records: Vec<Record>,
}

impl PointAssembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Assembler for PointAssembler {
    fn kind(&self) -> Kind {
        Kind::Point
    }

    fn records(&self) -> &[Record] {
        &self.records
    }

    fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    fn build(&self, frame: &Frame, opts: &Options) -> Document {
        let points = self
            .records
            .iter()
            .filter_map(|r| match r.geometry {
                Geometry::Point(p) => Some(p),
                _ => None,
            })
            .collect::<Vec<_>>();

        let attrs = AttributeSet::collect(&self.records, Scope::Point, &opts.attribute_prefix);

        let mut b = self.begin(frame, opts);
        b.set_points(frame.apply_all(&points));
        b.add_attributes(attrs.attributes());
        b.build()
    }
}

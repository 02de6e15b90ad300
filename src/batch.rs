//! The accumulate then flush batch.
use crate::*;

/// One document produced by a flush.
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// The kind of records the document holds.
    pub kind: Kind,
    pub document: Document,
}

/// A logical unit of work.
///
/// Records are appended with [`Batch::accumulate`], which only buffers them. All geometry
/// work happens in [`Batch::flush`], which consumes the batch.
///
/// # Example
/// ```rust
/// # use hougeo::*;
/// let mut batch = Batch::new(Options::default());
/// batch.accumulate(Record::point([0.0, 0.0, 0.0]).with_attr("attrib_id", 1)).unwrap();
/// batch.accumulate(Record::point([4.0, 4.0, 0.0]).with_attr("attrib_id", 2)).unwrap();
///
/// let out = batch.flush();
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].kind, Kind::Point);
/// assert_eq!(out[0].document.point_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Batch {
    opts: Options,
    bounding_volume: Option<Extents3>,
    ingested: usize,
    points: PointAssembler,
    lines: LineAssembler,
    areas: AreaAssembler,
    meshes: Vec<MeshAssembler>,
}

impl Batch {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            bounding_volume: None,
            ingested: 0,
            points: PointAssembler::new(),
            lines: LineAssembler::new(),
            areas: AreaAssembler::new(),
            meshes: Vec::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Set the bounding volume shared by the point, line and area documents.
    ///
    /// Without one, the volume is derived from the accumulated geometry at flush.
    pub fn set_bounding_volume(&mut self, bounds: Extents3) {
        self.bounding_volume = Some(bounds);
    }

    /// Number of records passed to [`Batch::accumulate`], including excluded ones.
    pub fn ingested(&self) -> usize {
        self.ingested
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.lines.is_empty()
            && self.areas.is_empty()
            && self.meshes.is_empty()
    }

    /// Buffer a record.
    ///
    /// Records of an unknown kind are ignored. A record whose geometry is not the shape its
    /// kind expects is excluded and reported; the batch carries on.
    pub fn accumulate(&mut self, record: Record) -> Result<(), Rejected> {
        let index = self.ingested;
        self.ingested += 1;

        if let Err(reason) = record.check_shape() {
            let e = Rejected::new(index, &record, reason);
            log::warn!("{}", e);
            return Err(e);
        }

        match record.kind {
            Kind::Point => self.points.push(record),
            Kind::Line => self.lines.push(record),
            Kind::Area => self.areas.push(record),
            Kind::Mesh => {
                let mut m = MeshAssembler::new();
                m.push(record);
                self.meshes.push(m);
            }
            Kind::Other(ref tag) => log::trace!("ignoring record {} of kind '{}'", index, tag),
        }

        Ok(())
    }

    /// Build every document of the batch.
    ///
    /// Point, line and area documents share one frame, from the bounding volume. Each mesh
    /// record is its own document, framed on its own bounds.
    pub fn flush(self) -> Vec<Output> {
        let Batch {
            opts,
            bounding_volume,
            points,
            lines,
            areas,
            meshes,
            ..
        } = self;

        let shared: [&dyn Assembler; 3] = [&points, &lines, &areas];
        let bounds = bounding_volume.unwrap_or_else(|| {
            shared
                .iter()
                .filter(|a| !a.is_empty())
                .map(|a| a.bounds())
                .collect()
        });
        let frame = Frame::from_extents(&bounds);

        let mut outputs = Vec::with_capacity(3 + meshes.len());
        for a in shared.into_iter().filter(|a| !a.is_empty()) {
            outputs.push(output(a, &frame, &opts));
        }
        for m in &meshes {
            let frame = Frame::from_extents(&m.bounds());
            outputs.push(output(m, &frame, &opts));
        }

        outputs
    }
}

fn output(a: &dyn Assembler, frame: &Frame, opts: &Options) -> Output {
    let document = a.build(frame, opts);
    log::debug!(
        "{} document: {} records, {} points, {} primitives",
        a.kind(),
        a.records().len(),
        document.point_count(),
        document.primitive_count()
    );
    Output {
        kind: a.kind(),
        document,
    }
}

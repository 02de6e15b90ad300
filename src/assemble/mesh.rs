use super::*;

/// Polygon meshes.
///
/// Sub-mesh vertex pools are concatenated and their face indices merged into one index
/// space. Each sub-mesh becomes a primitive group. Attributes describe the whole object so
/// they are written once, at global scope, from the first record.
#[derive(Clone, Debug, Default)]
pub struct MeshAssembler {
    records: Vec<Record>,
}

impl MeshAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn parts(&self) -> impl Iterator<Item = &SubMesh> + '_ {
        self.records
            .iter()
            .filter_map(|r| match &r.geometry {
                Geometry::Mesh(m) => Some(m.parts()),
                _ => None,
            })
            .flatten()
    }
}

impl Assembler for MeshAssembler {
    fn kind(&self) -> Kind {
        Kind::Mesh
    }

    fn records(&self) -> &[Record] {
        &self.records
    }

    fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    fn build(&self, frame: &Frame, opts: &Options) -> Document {
        let mut points = Vec::new();
        let mut counts = Vec::new();
        let mut group_sizes = Vec::new();
        let mut remapper = IndexRemapper::new();

        for part in self.parts() {
            points.extend_from_slice(part.vertices());
            let local = part.face_runs().flatten().copied().collect::<Vec<_>>();
            remapper.push(&local);
            counts.extend(part.face_runs().map(<[u32]>::len));
            group_sizes.push(part.face_len());
        }

        let attrs = AttributeSet::collect(
            self.records.iter().take(1),
            Scope::Global,
            &opts.attribute_prefix,
        );

        let mut b = self.begin(frame, opts);
        b.set_points(frame.apply_all(&points));
        b.set_indices(remapper.into_indices());
        b.set_primitives(Primitives::Faces(encode_counts(&counts)));
        b.add_primitive_groups(&opts.group_prefix, &group_sizes);
        b.add_attributes(attrs.attributes());
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::dummy_submesh;
    use serde_json::json;

    fn two_part_mesh() -> Record {
        let mesh = Mesh::new([dummy_submesh(&[3, 3, 4]), dummy_submesh(&[3, 3])]).unwrap();
        Record::mesh(mesh)
            .with_attr("attrib_name", "shed")
            .with_attr("attrib_storeys", 2)
    }

    #[test]
    fn faces_are_run_length_encoded() {
        let mut a = MeshAssembler::new();
        a.push(two_part_mesh());
        let frame = Frame::from_extents(&a.bounds());
        let doc = a.build(&frame, &Options::default());

        assert_eq!(doc.primitive_count(), 5);
        assert_eq!(doc.vertex_count(), 16);
        assert_eq!(doc.point_count(), 16);

        let run = &doc.get("primitives").unwrap()[0];
        assert_eq!(lookup(&run[1], "nvertices_rle"), Some(&json!([3, 2, 4, 1, 3, 2])));
    }

    #[test]
    fn sub_mesh_indices_follow_on() {
        let mut a = MeshAssembler::new();
        a.push(two_part_mesh());
        let frame = Frame::from_extents(&a.bounds());
        let doc = a.build(&frame, &Options::default());

        let pointref = lookup(doc.get("topology").unwrap(), "pointref").unwrap();
        let indices = lookup(pointref, "indices").unwrap().as_array().unwrap();
        let indices = indices.iter().map(|i| i.as_u64().unwrap()).collect::<Vec<_>>();
        assert_eq!(indices, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn one_group_per_sub_mesh() {
        let mut a = MeshAssembler::new();
        a.push(two_part_mesh());
        let opts = Options {
            group_prefix: "wall".into(),
            ..Default::default()
        };
        let frame = Frame::from_extents(&a.bounds());
        let doc = a.build(&frame, &opts);

        assert_eq!(
            doc.get("primitivegroups"),
            Some(&json!([
                [
                    ["name", "wall_0"],
                    ["selection", ["unordered", ["boolRLE", [3, true, 2, false]]]]
                ],
                [
                    ["name", "wall_1"],
                    ["selection", ["unordered", ["boolRLE", [3, false, 2, true]]]]
                ]
            ]))
        );
    }

    #[test]
    fn attributes_are_global() {
        let mut a = MeshAssembler::new();
        a.push(two_part_mesh());
        let frame = Frame::from_extents(&a.bounds());
        let doc = a.build(&frame, &Options::default());

        let attrs = doc.get("attributes").unwrap();
        assert_eq!(lookup(attrs, "primitiveattributes"), Some(&json!([])));
        let globals = lookup(attrs, "globalattributes").unwrap().as_array().unwrap();
        let names = globals
            .iter()
            .map(|g| lookup(&g[0], "name").unwrap().as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            ["sr_cs", "sr_cent_x", "sr_cent_y", "sr_cent_z", "name", "storeys"]
        );
    }
}

// Tests whole batches through to rendered documents
use hougeo::*;
use serde_json::{json, Value};

fn attr_block<'a>(doc: &'a Document, scope: &str, name: &str) -> &'a Value {
    let attrs = doc.get("attributes").unwrap();
    lookup(attrs, scope)
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .find(|b| lookup(&b[0], "name") == Some(&json!(name)))
        .unwrap_or_else(|| panic!("no {} attribute '{}'", scope, name))
}

fn values<'a>(block: &'a Value, keyword: &str) -> &'a Value {
    let v = lookup(&block[1], "values").unwrap();
    lookup(v, keyword).unwrap()
}

fn square(x: f64, y: f64) -> Polygon3 {
    Polygon3::new([
        [x, y, 0.0],
        [x + 1.0, y, 0.0],
        [x + 1.0, y + 1.0, 0.0],
        [x, y + 1.0, 0.0],
        [x, y, 0.0],
    ])
    .unwrap()
}

#[test]
fn three_point_cloud() {
    let mut b = Batch::new(Options::default());
    b.set_bounding_volume(Extents3::from_min_max([0.0; 3], [4.0, 4.0, 0.0]));
    let pts: [(Point2, i64); 3] = [([0.0, 0.0], 1), ([4.0, 0.0], 2), ([0.0, 4.0], 3)];
    for (p, id) in pts {
        let r = Record::point(p.with_z(0.0)).with_attr("attrib_id", id);
        b.accumulate(r).unwrap();
    }

    let out = b.flush();
    assert_eq!(out.len(), 1);
    let doc = &out[0].document;

    assert_eq!(doc.point_count(), 3);
    assert_eq!(doc.get("pointcount"), Some(&json!(3)));

    let p = attr_block(doc, "pointattributes", "P");
    assert_eq!(lookup(&p[1], "size"), Some(&json!(3)));
    assert_eq!(
        values(p, "tuples"),
        &json!([[-2.0, 0.0, 2.0], [2.0, 0.0, 2.0], [-2.0, 0.0, -2.0]])
    );
    assert_eq!(
        lookup(&p[0], "options"),
        Some(&json!({ "type": { "type": "string", "value": "point" } }))
    );

    let id = attr_block(doc, "pointattributes", "id");
    assert_eq!(lookup(&id[0], "type"), Some(&json!("numeric")));
    assert_eq!(values(id, "arrays"), &json!([[1, 2, 3]]));

    let cent_x = attr_block(doc, "globalattributes", "sr_cent_x");
    assert_eq!(values(cent_x, "arrays"), &json!([[2.0]]));
    let cent_z = attr_block(doc, "globalattributes", "sr_cent_z");
    assert_eq!(values(cent_z, "arrays"), &json!([[2.0]]));
}

#[test]
fn polygon_drops_closing_vertex() {
    let mut b = Batch::new(Options::default());
    b.accumulate(Record::area(square(10.0, 10.0)).with_coord_sys("EPSG:28355"))
        .unwrap();

    let out = b.flush();
    let doc = &out[0].document;
    let run = &doc.get("primitives").unwrap()[0];
    assert_eq!(lookup(&run[1], "nvertices"), Some(&json!([4])));
    assert_eq!(doc.vertex_count(), 4);

    let cs = attr_block(doc, "globalattributes", "sr_cs");
    assert_eq!(lookup(&cs[1], "strings"), Some(&json!(["EPSG:28355"])));
}

#[test]
fn mesh_faces_and_groups() {
    // two sub-meshes: faces of 3, 3, 4 vertices then 3, 3
    fn sub_mesh(sizes: &[usize]) -> SubMesh {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for &n in sizes {
            let start = vertices.len() as u32;
            vertices.extend((0..n).map(|i| [i as f64, start as f64, 1.0]));
            let mut f = (start..start + n as u32).collect::<Vec<_>>();
            f.push(start);
            faces.push(f);
        }
        SubMesh::new(vertices, faces).unwrap()
    }

    let mesh = Mesh::new([sub_mesh(&[3, 3, 4]), sub_mesh(&[3, 3])]).unwrap();
    let mut b = Batch::new(Options::default());
    b.accumulate(Record::mesh(mesh).with_attr("attrib_name", "block"))
        .unwrap();

    let out = b.flush();
    assert_eq!(out[0].kind, Kind::Mesh);
    let doc = &out[0].document;

    assert_eq!(doc.get("primitivecount"), Some(&json!(5)));
    let run = &doc.get("primitives").unwrap()[0];
    assert_eq!(
        lookup(&run[1], "nvertices_rle"),
        Some(&json!([3, 2, 4, 1, 3, 2]))
    );

    let groups = doc.get("primitivegroups").unwrap().as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0][0], json!(["name", "part_0"]));
    assert_eq!(
        groups[0][1],
        json!(["selection", ["unordered", ["boolRLE", [3, true, 2, false]]]])
    );
    assert_eq!(groups[1][0], json!(["name", "part_1"]));
    assert_eq!(
        groups[1][1],
        json!(["selection", ["unordered", ["boolRLE", [3, false, 2, true]]]])
    );

    let name = attr_block(doc, "globalattributes", "name");
    assert_eq!(lookup(&name[1], "strings"), Some(&json!(["block"])));
}

#[test]
fn each_mesh_record_is_a_document() {
    let tri = |x: f64| {
        let sm = SubMesh::new(
            vec![[x, 0.0, 0.0], [x + 1.0, 0.0, 0.0], [x, 1.0, 0.0]],
            vec![vec![0, 1, 2, 0]],
        )
        .unwrap();
        Record::mesh(Mesh::from(sm))
    };

    let mut b = Batch::new(Options::default());
    b.accumulate(tri(0.0)).unwrap();
    b.accumulate(tri(100.0)).unwrap();

    let out = b.flush();
    assert_eq!(out.len(), 2);
    // both are framed on their own bounds
    assert_eq!(out[0].document.bounds(), out[1].document.bounds());

    for (o, cx) in out.iter().zip([0.5, 100.5]) {
        let doc = &o.document;
        let p = attr_block(doc, "pointattributes", "P");
        assert_eq!(
            values(p, "tuples"),
            &json!([[-0.5, 0.0, 0.5], [0.5, 0.0, 0.5], [-0.5, 0.0, -0.5]])
        );
        let cent_x = attr_block(doc, "globalattributes", "sr_cent_x");
        assert_eq!(values(cent_x, "arrays"), &json!([[cx]]));
    }
}

#[test]
fn mismatched_record_continues_batch() {
    let mut b = Batch::new(Options::default());
    b.accumulate(Record::line(Polyline3::new([[0.0; 3], [1.0; 3]]).unwrap()))
        .unwrap();
    let e = b
        .accumulate(Record::new(Kind::Line, Geometry::Area(square(0.0, 0.0))))
        .unwrap_err();
    assert_eq!(
        e.to_string(),
        "record 1 (line) excluded: line record requires polyline geometry, found polygon"
    );

    let out = b.flush();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].document.primitive_count(), 1);
}

#[test]
fn attribute_values_align_with_records() {
    let mut b = Batch::new(Options::default());
    let names = ["a", "b", "a", "c"];
    for (i, name) in names.iter().enumerate() {
        let r = Record::area(square(i as f64 * 2.0, 0.0)).with_attr("attrib_name", *name);
        b.accumulate(r).unwrap();
    }
    // missing value takes the default
    b.accumulate(Record::area(square(10.0, 0.0))).unwrap();

    let out = b.flush();
    let doc = &out[0].document;
    let block = attr_block(doc, "primitiveattributes", "name");
    assert_eq!(lookup(&block[1], "strings"), Some(&json!(["a", "b", "c", ""])));
    let indices = lookup(&block[1], "indices").unwrap();
    assert_eq!(lookup(indices, "arrays"), Some(&json!([[0, 1, 0, 2, 3]])));
}

#[test]
fn dxf_into_documents() {
    let lines = [
        Polyline3::new([[0.0; 3], [10.0, 0.0, 0.0]]).unwrap(),
        Polyline3::new([[0.0; 3], [0.0, 10.0, 0.0], [10.0, 10.0, 0.0], [0.0; 3]]).unwrap(),
    ];
    let bytes = io::dxf::to_dxf(&lines).unwrap();
    let records = io::dxf::records_from_dxf(&bytes).unwrap();

    let mut b = Batch::new(Options::default());
    for r in records {
        b.accumulate(r).unwrap();
    }

    let out = b.flush();
    let kinds = out.iter().map(|o| o.kind.clone()).collect::<Vec<_>>();
    assert_eq!(kinds, [Kind::Line, Kind::Area]);

    let mut buf = Vec::new();
    io::write_document(&out[1].document, &mut buf).unwrap();
    let parsed: Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(&parsed, out[1].document.to_value());
    assert_eq!(lookup(&parsed, "primitivecount"), Some(&json!(1)));
}

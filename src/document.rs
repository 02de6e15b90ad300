//! Document assembly and rendering.
//!
//! A [`DocumentBuilder`] collects everything one batch produces. [`DocumentBuilder::build`]
//! renders it once into a [`Document`], which is the alternating key/value tree of the
//! geometry schema.
use crate::*;
use serde_json::{json, Map, Value as Json};

/// Primitive topology of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitives {
    /// Open curves, one vertex count per curve.
    Curves(Vec<usize>),
    /// Closed polygons, one vertex count per polygon.
    Polygons(Vec<usize>),
    /// Polygon faces, with vertex counts as `(count, repeat)` runs.
    Faces(Vec<Run<usize>>),
}

impl Primitives {
    /// The schema type tag and the key the vertex counts are written under.
    fn tags(&self) -> (&'static str, &'static str) {
        match self {
            Primitives::Curves(_) => ("PolygonCurve_run", "nvertices"),
            Primitives::Polygons(_) => ("Polygon_run", "nvertices"),
            Primitives::Faces(_) => ("Polygon_run", "nvertices_rle"),
        }
    }

    /// The primitive kind: `open`, `closed` or `face`.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitives::Curves(_) => "open",
            Primitives::Polygons(_) => "closed",
            Primitives::Faces(_) => "face",
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Primitives::Curves(x) | Primitives::Polygons(x) => x.len(),
            Primitives::Faces(runs) => runs.iter().map(|r| r.1).sum(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Primitives::Curves(x) | Primitives::Polygons(x) => x.iter().sum(),
            Primitives::Faces(runs) => runs.iter().map(|(v, n)| v * n).sum(),
        }
    }

    fn render(&self) -> Json {
        let (ty, key) = self.tags();
        let counts = match self {
            Primitives::Curves(x) | Primitives::Polygons(x) => json!(x),
            Primitives::Faces(runs) => json!(flatten_runs(runs)),
        };

        json!([[
            ["type", ty],
            ["startvertex", 0, "nprimitives", self.count(), key, counts]
        ]])
    }
}

/// A named membership selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub name: String,
    pub scope: Scope,
    pub selection: Selection,
}

impl Group {
    fn render(&self) -> Json {
        let rle = self
            .selection
            .iter()
            .flat_map(|&(n, f)| [json!(n), json!(f)])
            .collect::<Vec<_>>();

        json!([
            ["name", self.name],
            ["selection", ["unordered", ["boolRLE", rle]]]
        ])
    }
}

/// Collects one batch's geometry, topology, attributes and groups.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    file_version: String,
    metadata: Metadata,
    point_count: usize,
    bounds: Extents3,
    indices: Vec<u32>,
    primitives: Option<Primitives>,
    attributes: Vec<AttributeBlock>,
    groups: Vec<Group>,
}

impl DocumentBuilder {
    pub fn new(opts: &Options, bounds: Extents3) -> Self {
        Self {
            file_version: opts.file_version.clone(),
            metadata: opts.metadata.clone(),
            point_count: 0,
            bounds,
            indices: Vec::new(),
            primitives: None,
            attributes: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Set the (already normalized) points, written as the `P` point attribute.
    pub fn set_points(&mut self, points: Vec<Point3>) {
        self.point_count = points.len();
        self.attributes.retain(|a| !(a.scope == Scope::Point && a.name == "P"));
        let p = Attribute::new("P", Scope::Point, AttrType::Vec3Float, points)
            .with_role(Role::Position);
        // P leads the point attributes
        self.attributes.insert(0, p.encode());
    }

    pub fn set_indices(&mut self, indices: impl IntoIterator<Item = u32>) {
        self.indices = indices.into_iter().collect();
    }

    pub fn set_primitives(&mut self, primitives: Primitives) {
        self.primitives = Some(primitives);
    }

    pub fn add_attribute(&mut self, attribute: &Attribute) {
        self.attributes.push(attribute.encode());
    }

    pub fn add_attributes<'a>(&mut self, attributes: impl IntoIterator<Item = &'a Attribute>) {
        for a in attributes {
            self.add_attribute(a);
        }
    }

    /// Add one primitive group per size, named `<prefix>_<i>`.
    pub fn add_primitive_groups(&mut self, prefix: &str, sizes: &[usize]) {
        let groups = group_selections(sizes)
            .into_iter()
            .enumerate()
            .map(|(i, selection)| Group {
                name: format!("{}_{}", prefix, i),
                scope: Scope::Primitive,
                selection,
            });
        self.groups.extend(groups);
    }

    /// Add the `sr_*` global attributes describing where the batch origin lies.
    pub fn set_spatial_ref(&mut self, frame: &Frame, coord_sys: Option<&str>) {
        let [x, y, z] = frame.centroid_yup();
        let cs = coord_sys.unwrap_or("unknown");
        let attrs = [
            Attribute::new("sr_cs", Scope::Global, AttrType::String, cs),
            Attribute::new("sr_cent_x", Scope::Global, AttrType::Float, x),
            Attribute::new("sr_cent_y", Scope::Global, AttrType::Float, y),
            Attribute::new("sr_cent_z", Scope::Global, AttrType::Float, z),
        ];
        self.add_attributes(&attrs);
    }

    fn blocks(&self, scope: Scope) -> impl Iterator<Item = &AttributeBlock> + '_ {
        self.attributes.iter().filter(move |a| a.scope == scope)
    }

    fn groups_json(&self, scope: Scope) -> Json {
        Json::Array(
            self.groups
                .iter()
                .filter(|g| g.scope == scope)
                .map(Group::render)
                .collect(),
        )
    }

    fn attribute_summary(&self) -> String {
        Scope::ALL
            .into_iter()
            .filter_map(|scope| {
                let names = self.blocks(scope).map(|a| a.name.as_str()).collect::<Vec<_>>();
                (!names.is_empty()).then(|| {
                    format!(
                        "     {} {} attributes:\t{}\n",
                        names.len(),
                        scope.as_str(),
                        names.join(", ")
                    )
                })
            })
            .collect()
    }

    /// Render the document.
    pub fn build(self) -> Document {
        let point_count = self.point_count;
        let vertex_count = self.primitives.as_ref().map_or(0, Primitives::vertex_count);
        let primitive_count = self.primitives.as_ref().map_or(0, Primitives::count);
        let bounds = self.bounds.flatten();

        let mut info = Map::new();
        if let Some(artist) = &self.metadata.artist {
            info.insert("artist".into(), json!(artist));
        }
        info.insert("software".into(), json!(self.metadata.software));
        info.insert("date".into(), json!(self.metadata.date));
        info.insert("hostname".into(), json!(self.metadata.hostname));
        info.insert("bounds".into(), json!(bounds));
        info.insert("attribute_summary".into(), json!(self.attribute_summary()));

        let blocks = |scope| self.blocks(scope).map(|a| &a.json).collect::<Vec<_>>();
        let primitives = self
            .primitives
            .as_ref()
            .map_or_else(|| json!([]), Primitives::render);

        let json = json!([
            "fileversion", self.file_version,
            "hasindex", false,
            "pointcount", point_count,
            "vertexcount", vertex_count,
            "primitivecount", primitive_count,
            "info", info,
            "topology", [
                "pointref", [
                    "indices", self.indices
                ]
            ],
            "attributes", [
                "vertexattributes", blocks(Scope::Vertex),
                "pointattributes", blocks(Scope::Point),
                "primitiveattributes", blocks(Scope::Primitive),
                "globalattributes", blocks(Scope::Global)
            ],
            "primitives", primitives,
            "pointgroups", self.groups_json(Scope::Point),
            "primitivegroups", self.groups_json(Scope::Primitive),
            "vertexgroups", self.groups_json(Scope::Vertex),
            "edgegroups", []
        ]);

        Document {
            point_count,
            vertex_count,
            primitive_count,
            bounds,
            json,
        }
    }
}

/// A rendered document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    point_count: usize,
    vertex_count: usize,
    primitive_count: usize,
    bounds: [f64; 6],
    json: Json,
}

impl Document {
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    pub fn bounds(&self) -> [f64; 6] {
        self.bounds
    }

    pub fn to_value(&self) -> &Json {
        &self.json
    }

    pub fn into_value(self) -> Json {
        self.json
    }

    /// Look up a top level key.
    pub fn get(&self, key: &str) -> Option<&Json> {
        lookup(&self.json, key)
    }

    /// The compact textual form, without added whitespace.
    pub fn to_json_string(&self) -> String {
        self.json.to_string()
    }
}

/// Look up a key in an alternating key/value list.
pub fn lookup<'a>(list: &'a Json, key: &str) -> Option<&'a Json> {
    let list = list.as_array()?;
    list.chunks(2)
        .find(|kv| kv[0] == key)
        .and_then(|kv| kv.get(1))
}

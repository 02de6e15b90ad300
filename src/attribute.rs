//! Typed attribute blocks.
//!
//! An [`Attribute`] is a named column of values attached to one [`Scope`] of a document.
//! The [`AttrType`] fixes the tuple size, the storage and the defaults of the column; the
//! values are coerced into the column type as they are pushed so rendering never fails.
use rustc_hash::FxHashMap as HashMap;
use serde_json::{json, Map, Value as Json};

/// The document level an attribute or group attaches to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Point,
    Vertex,
    Primitive,
    Global,
}

impl Scope {
    pub const ALL: [Scope; 4] = [Scope::Point, Scope::Vertex, Scope::Primitive, Scope::Global];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Point => "point",
            Scope::Vertex => "vertex",
            Scope::Primitive => "primitive",
            Scope::Global => "global",
        }
    }
}

/// Underlying storage of a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    Int32,
    Fpreal32,
}

impl Storage {
    pub fn as_str(self) -> &'static str {
        match self {
            Storage::Int32 => "int32",
            Storage::Fpreal32 => "fpreal32",
        }
    }
}

/// Attribute types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Int,
    Float,
    Vec2Int,
    Vec2Float,
    Vec3Int,
    Vec3Float,
    Vec4Int,
    Vec4Float,
    String,
}

/// The fixed layout of an [`AttrType`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeSpec {
    pub tag: &'static str,
    /// Tuple size.
    pub size: usize,
    pub storage: Storage,
    /// Numeric types carry a zeroed default tuple, strings have none.
    pub numeric: bool,
}

const fn spec(tag: &'static str, size: usize, storage: Storage, numeric: bool) -> TypeSpec {
    TypeSpec {
        tag,
        size,
        storage,
        numeric,
    }
}

// indexed by `AttrType as usize`
const TYPE_TABLE: [TypeSpec; 9] = [
    spec("int", 1, Storage::Int32, true),
    spec("float", 1, Storage::Fpreal32, true),
    spec("vec2int", 2, Storage::Int32, true),
    spec("vec2float", 2, Storage::Fpreal32, true),
    spec("vec3int", 3, Storage::Int32, true),
    spec("vec3float", 3, Storage::Fpreal32, true),
    spec("vec4int", 4, Storage::Int32, true),
    spec("vec4float", 4, Storage::Fpreal32, true),
    spec("string", 1, Storage::Int32, false),
];

impl AttrType {
    pub const ALL: [AttrType; 9] = [
        AttrType::Int,
        AttrType::Float,
        AttrType::Vec2Int,
        AttrType::Vec2Float,
        AttrType::Vec3Int,
        AttrType::Vec3Float,
        AttrType::Vec4Int,
        AttrType::Vec4Float,
        AttrType::String,
    ];

    pub fn spec(self) -> &'static TypeSpec {
        &TYPE_TABLE[self as usize]
    }

    pub fn size(self) -> usize {
        self.spec().size
    }

    pub fn storage(self) -> Storage {
        self.spec().storage
    }

    pub fn is_numeric(self) -> bool {
        self.spec().numeric
    }

    pub fn tag(self) -> &'static str {
        self.spec().tag
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

/// Interpretation hint handed to the consuming tool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The attribute holds point positions.
    Position,
    /// The attribute holds a direction vector.
    Direction,
}

/// A single scalar value, as supplied by a record.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}
impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int(x.into())
    }
}
impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}
impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::Str(x.to_string())
    }
}
impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::Str(x)
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self {
        x.map(Into::into).unwrap_or(Value::Null)
    }
}

/// The flat, component-wise values of a column.
///
/// Tuple types store `size` consecutive components per record.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    Int(Vec<i32>),
    Float(Vec<f64>),
    Str(Vec<String>),
}

impl Values {
    fn empty(ty: AttrType) -> Self {
        match (ty.is_numeric(), ty.storage()) {
            (false, _) => Values::Str(Vec::new()),
            (true, Storage::Int32) => Values::Int(Vec::new()),
            (true, Storage::Fpreal32) => Values::Float(Vec::new()),
        }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        match self {
            Values::Int(x) => x.len(),
            Values::Float(x) => x.len(),
            Values::Str(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, v: &Value) {
        match self {
            Values::Int(x) => x.push(match v {
                Value::Int(i) => int32(*i),
                // saturates, NaN is 0
                Value::Float(f) => *f as i32,
                Value::Str(s) => s.trim().parse().map(int32).unwrap_or_default(),
                Value::Null => 0,
            }),
            Values::Float(x) => x.push(match v {
                Value::Int(i) => *i as f64,
                Value::Float(f) => *f,
                Value::Str(s) => s.trim().parse().unwrap_or_default(),
                Value::Null => 0.0,
            }),
            Values::Str(x) => x.push(match v {
                Value::Int(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                Value::Str(s) => s.clone(),
                Value::Null => String::new(),
            }),
        }
    }

    fn extend(&mut self, vs: Values) {
        match vs {
            Values::Int(x) => x.into_iter().for_each(|i| self.push(&Value::Int(i.into()))),
            Values::Float(x) => x.into_iter().for_each(|f| self.push(&Value::Float(f))),
            Values::Str(x) => x.into_iter().for_each(|s| self.push(&Value::Str(s))),
        }
    }
}

/// Clamp a host integer into the `int32` storage range.
fn int32(i: i64) -> i32 {
    let x = i.clamp(i32::MIN.into(), i32::MAX.into()) as i32;
    if i64::from(x) != i {
        log::debug!("integer {} is outside int32 storage, clamped to {}", i, x);
    }
    x
}

impl From<i64> for Values {
    fn from(x: i64) -> Self {
        Values::Int(vec![int32(x)])
    }
}
impl From<f64> for Values {
    fn from(x: f64) -> Self {
        Values::Float(vec![x])
    }
}
impl From<&str> for Values {
    fn from(x: &str) -> Self {
        Values::Str(vec![x.to_string()])
    }
}
impl From<Vec<i64>> for Values {
    fn from(x: Vec<i64>) -> Self {
        Values::Int(x.into_iter().map(int32).collect())
    }
}
impl From<Vec<f64>> for Values {
    fn from(x: Vec<f64>) -> Self {
        Values::Float(x)
    }
}
impl From<Vec<String>> for Values {
    fn from(x: Vec<String>) -> Self {
        Values::Str(x)
    }
}
impl<const D: usize> From<Vec<[f64; D]>> for Values {
    fn from(x: Vec<[f64; D]>) -> Self {
        Values::Float(x.into_iter().flatten().collect())
    }
}
impl<const D: usize> From<Vec<[i64; D]>> for Values {
    fn from(x: Vec<[i64; D]>) -> Self {
        Values::Int(x.into_iter().flatten().map(int32).collect())
    }
}

/// A named, typed column of values for one scope.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    scope: Scope,
    ty: AttrType,
    role: Option<Role>,
    values: Values,
}

impl Attribute {
    /// An attribute with no values.
    pub fn empty(name: impl Into<String>, scope: Scope, ty: AttrType) -> Self {
        Self {
            name: name.into(),
            scope,
            ty,
            role: None,
            values: Values::empty(ty),
        }
    }

    /// Build an attribute from values.
    ///
    /// Values are coerced into the column storage of `ty`. A trailing partial tuple is
    /// padded with the type defaults.
    pub fn new(
        name: impl Into<String>,
        scope: Scope,
        ty: AttrType,
        values: impl Into<Values>,
    ) -> Self {
        let mut x = Self::empty(name, scope, ty);
        x.values.extend(values.into());
        while x.values.len() % ty.size() != 0 {
            x.values.push(&Value::Null);
        }
        x
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn ty(&self) -> AttrType {
        self.ty
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.values.len() / self.ty.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one record's value.
    ///
    /// Nulls become the type default (`0`, `0.0` or `""`). A value pushed into a tuple
    /// type fills every component.
    pub fn push(&mut self, v: impl Into<Value>) {
        let v = v.into();
        for _ in 0..self.ty.size() {
            self.values.push(&v);
        }
    }

    /// Render the `[header, value]` block.
    pub fn encode(&self) -> AttributeBlock {
        let ty = self.ty.spec();

        let mut options = Map::new();
        if let Some(role) = self.role {
            let value = match role {
                Role::Position => "point",
                Role::Direction => "vector",
            };
            options.insert("type".into(), json!({ "type": "string", "value": value }));
        }

        let vtype = if ty.numeric { "numeric" } else { "string" };
        let header = json!([
            "scope", "public",
            "type", vtype,
            "name", self.name,
            "options", options
        ]);

        let value = match &self.values {
            Values::Str(strings) => {
                let (table, indices) = string_table(strings);
                json!([
                    "size", ty.size,
                    "storage", ty.storage.as_str(),
                    "strings", table,
                    "indices", [
                        "size", ty.size,
                        "storage", Storage::Int32.as_str(),
                        "arrays", [indices]
                    ]
                ])
            }
            Values::Int(x) => self.numeric_block(x, json!(vec![0i32; ty.size])),
            Values::Float(x) => self.numeric_block(x, json!(vec![0.0f64; ty.size])),
        };

        AttributeBlock {
            scope: self.scope,
            name: self.name.clone(),
            json: json!([header, value]),
        }
    }

    fn numeric_block<T>(&self, values: &[T], defaults: Json) -> Json
    where
        T: serde::Serialize,
    {
        let ty = self.ty.spec();
        let (keyword, data) = if ty.size > 1 {
            ("tuples", json!(values.chunks(ty.size).collect::<Vec<_>>()))
        } else {
            ("arrays", json!([values]))
        };

        json!([
            "size", ty.size,
            "storage", ty.storage.as_str(),
            "defaults", [
                "size", ty.size,
                "storage", "fpreal64",
                "values", defaults
            ],
            "values", [
                "size", ty.size,
                "storage", ty.storage.as_str(),
                keyword, data
            ]
        ])
    }
}

/// Deduplicate strings into a table, in first-seen order, with one table index per value.
pub fn string_table(values: &[String]) -> (Vec<&str>, Vec<usize>) {
    let mut table = Vec::new();
    let mut lookup: HashMap<&str, usize> = HashMap::default();

    let indices = values
        .iter()
        .map(|s| {
            *lookup.entry(s.as_str()).or_insert_with(|| {
                table.push(s.as_str());
                table.len() - 1
            })
        })
        .collect();

    (table, indices)
}

/// Encode a block straight from values.
///
/// This is [`Attribute::new`] followed by [`Attribute::encode`].
pub fn encode(
    name: &str,
    scope: Scope,
    ty: AttrType,
    values: impl Into<Values>,
    role: Option<Role>,
) -> AttributeBlock {
    let mut a = Attribute::new(name, scope, ty, values);
    a.role = role;
    a.encode()
}

/// A rendered attribute, ready to be placed in a document.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeBlock {
    pub scope: Scope,
    pub name: String,
    pub json: Json,
}

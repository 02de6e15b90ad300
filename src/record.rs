//! The records a host feeds into a [`Batch`](crate::Batch).
use crate::*;
use std::fmt;

/// The kind tag of a record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Point,
    Line,
    Area,
    Mesh,
    /// Anything else the host produces. Ignored.
    Other(String),
}

impl Kind {
    /// Parse a host kind tag.
    ///
    /// Unknown tags become [`Kind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "point" => Kind::Point,
            "line" | "polyline" => Kind::Line,
            "area" | "polygon" => Kind::Area,
            "mesh" | "object" => Kind::Mesh,
            x => Kind::Other(x.to_string()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Point => write!(f, "point"),
            Kind::Line => write!(f, "line"),
            Kind::Area => write!(f, "area"),
            Kind::Mesh => write!(f, "mesh"),
            Kind::Other(x) => write!(f, "{}", x),
        }
    }
}

/// The geometry carried by a record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Geometry {
    Point(Point3),
    Line(Polyline3),
    Area(Polygon3),
    Mesh(Mesh),
    None,
}

impl Geometry {
    fn name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Line(_) => "polyline",
            Geometry::Area(_) => "polygon",
            Geometry::Mesh(_) => "mesh",
            Geometry::None => "no geometry",
        }
    }

    /// Every vertex of the geometry.
    fn points(&self) -> Box<dyn Iterator<Item = &Point3> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(p)),
            Geometry::Line(x) => Box::new(x.pts().iter()),
            Geometry::Area(x) => Box::new(x.boundary().iter()),
            Geometry::Mesh(x) => Box::new(x.parts().iter().flat_map(|m| m.vertices())),
            Geometry::None => Box::new(std::iter::empty()),
        }
    }
}

impl Aabb for Geometry {
    type Space = Point3;
    fn aabb(&self) -> Extents3 {
        match self {
            Geometry::Point(p) => Extents3::from_min_max(*p, *p),
            Geometry::Line(x) => x.aabb(),
            Geometry::Area(x) => x.aabb(),
            Geometry::Mesh(x) => x.aabb(),
            Geometry::None => Extents3::zero(),
        }
    }
}

/// An attribute value as the host holds it: a coarse class plus a possibly null value.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Int(Option<i64>),
    Float(Option<f64>),
    Str(Option<String>),
    /// A null without a class.
    Null,
    /// Any other class, such as binary blobs or lists.
    Unsupported,
}

impl Field {
    /// The attribute type a field of this class encodes as.
    ///
    /// Classes outside integer, float and string have no type.
    pub fn attr_type(&self) -> Option<AttrType> {
        match self {
            Field::Int(_) => Some(AttrType::Int),
            Field::Float(_) => Some(AttrType::Float),
            Field::Str(_) => Some(AttrType::String),
            Field::Null | Field::Unsupported => None,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Field::Int(x) => (*x).into(),
            Field::Float(x) => (*x).into(),
            Field::Str(x) => x.clone().into(),
            Field::Null | Field::Unsupported => Value::Null,
        }
    }
}

impl From<i64> for Field {
    fn from(x: i64) -> Self {
        Field::Int(Some(x))
    }
}
impl From<i32> for Field {
    fn from(x: i32) -> Self {
        Field::Int(Some(x.into()))
    }
}
impl From<f64> for Field {
    fn from(x: f64) -> Self {
        Field::Float(Some(x))
    }
}
impl From<&str> for Field {
    fn from(x: &str) -> Self {
        Field::Str(Some(x.to_string()))
    }
}
impl From<String> for Field {
    fn from(x: String) -> Self {
        Field::Str(Some(x))
    }
}

/// One host record: a kind tag, geometry, attributes and a coordinate system.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub kind: Kind,
    pub geometry: Geometry,
    /// Attributes in the host's order.
    pub attributes: Vec<(String, Field)>,
    pub coord_sys: Option<String>,
}

impl Record {
    pub fn new(kind: Kind, geometry: Geometry) -> Self {
        Self {
            kind,
            geometry,
            attributes: Vec::new(),
            coord_sys: None,
        }
    }

    pub fn point(p: Point3) -> Self {
        Self::new(Kind::Point, Geometry::Point(p))
    }

    pub fn line(line: Polyline3) -> Self {
        Self::new(Kind::Line, Geometry::Line(line))
    }

    pub fn area(area: Polygon3) -> Self {
        Self::new(Kind::Area, Geometry::Area(area))
    }

    pub fn mesh(mesh: Mesh) -> Self {
        Self::new(Kind::Mesh, Geometry::Mesh(mesh))
    }

    /// Set an attribute, replacing any with the same name.
    pub fn with_attr(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        let name = name.into();
        let field = field.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, f)) => *f = field,
            None => self.attributes.push((name, field)),
        }
        self
    }

    pub fn with_coord_sys(mut self, cs: impl Into<String>) -> Self {
        self.coord_sys = Some(cs.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&Field> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    /// Check that the geometry is the shape the kind expects.
    ///
    /// Every vertex must have finite coordinates. Records of [`Kind::Other`] always pass.
    pub fn check_shape(&self) -> Result<(), &'static str> {
        let finite = || self.geometry.points().all(|p| p.is_finite());
        match (&self.kind, &self.geometry) {
            (Kind::Point, Geometry::Point(_)) if !finite() => {
                Err("point has non-finite coordinates")
            }
            (Kind::Line, Geometry::Line(_)) if !finite() => Err("line has non-finite coordinates"),
            (Kind::Area, Geometry::Area(_)) if !finite() => Err("area has non-finite coordinates"),
            (Kind::Mesh, Geometry::Mesh(_)) if !finite() => Err("mesh has non-finite coordinates"),
            (Kind::Point, Geometry::Point(_))
            | (Kind::Line, Geometry::Line(_))
            | (Kind::Area, Geometry::Area(_))
            | (Kind::Mesh, Geometry::Mesh(_))
            | (Kind::Other(_), _) => Ok(()),
            (Kind::Point, _) => Err("point record requires point geometry"),
            (Kind::Line, _) => Err("line record requires polyline geometry"),
            (Kind::Area, _) => Err("area record requires polygon geometry"),
            (Kind::Mesh, _) => Err("mesh record requires mesh geometry"),
        }
    }
}

/// A record excluded from a batch because its geometry did not fit its kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejected {
    /// Position of the record in ingestion order.
    pub index: usize,
    pub kind: Kind,
    pub reason: &'static str,
    /// The geometry that was found.
    pub found: &'static str,
}

impl Rejected {
    pub(crate) fn new(index: usize, record: &Record, reason: &'static str) -> Self {
        Self {
            index,
            kind: record.kind.clone(),
            reason,
            found: record.geometry.name(),
        }
    }
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "record {} ({}) excluded: {}, found {}",
            self.index, self.kind, self.reason, self.found
        )
    }
}

impl std::error::Error for Rejected {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags() {
        assert_eq!(Kind::from_tag("point"), Kind::Point);
        assert_eq!(Kind::from_tag("polyline"), Kind::Line);
        assert_eq!(Kind::from_tag("polygon"), Kind::Area);
        assert_eq!(Kind::from_tag("object"), Kind::Mesh);
        assert_eq!(Kind::from_tag("bbx"), Kind::Other("bbx".into()));
        assert_eq!(Kind::Area.to_string(), "area");
    }

    #[test]
    fn field_classes() {
        assert_eq!(Field::from(3).attr_type(), Some(AttrType::Int));
        assert_eq!(Field::from(3.5).attr_type(), Some(AttrType::Float));
        assert_eq!(Field::from("a").attr_type(), Some(AttrType::String));
        assert_eq!(Field::Null.attr_type(), None);
        assert_eq!(Field::Unsupported.attr_type(), None);

        assert_eq!(Field::Int(None).value(), Value::Null);
        assert_eq!(Field::from("a").value(), Value::Str("a".into()));
    }

    #[test]
    fn attributes_replace_by_name() {
        let r = Record::point([0.0; 3])
            .with_attr("attrib_id", 1)
            .with_attr("attrib_name", "a")
            .with_attr("attrib_id", 2);
        assert_eq!(r.attributes.len(), 2);
        assert_eq!(r.attr("attrib_id"), Some(&Field::Int(Some(2))));
        assert_eq!(r.attr("missing"), None);
    }

    #[test]
    fn shape_checks() {
        let line = Polyline3::new([[0.0; 3], [1.0, 0.0, 0.0]]).unwrap();

        assert!(Record::line(line.clone()).check_shape().is_ok());
        assert!(Record::new(Kind::Area, Geometry::Line(line.clone()))
            .check_shape()
            .is_err());
        assert!(Record::new(Kind::Other("bbx".into()), Geometry::None)
            .check_shape()
            .is_ok());
        assert!(Record::point([f64::NAN, 0.0, 0.0]).check_shape().is_err());

        let r = Record::new(Kind::Mesh, Geometry::Line(line));
        let e = Rejected::new(4, &r, r.check_shape().unwrap_err());
        assert_eq!(
            e.to_string(),
            "record 4 (mesh) excluded: mesh record requires mesh geometry, found polyline"
        );
    }

    #[test]
    fn non_finite_vertices_are_rejected() {
        let nan = [0.0, f64::NAN, 0.0];
        let inf = [f64::INFINITY, 0.0, 0.0];

        let line = Record::line(Polyline3::new([[0.0; 3], nan]).unwrap());
        assert_eq!(line.check_shape(), Err("line has non-finite coordinates"));

        let area = Polygon3::new([[0.0; 3], [1.0, 0.0, 0.0], inf, [0.0; 3]]).unwrap();
        assert_eq!(
            Record::area(area).check_shape(),
            Err("area has non-finite coordinates")
        );

        let sm = SubMesh::new(vec![[0.0; 3], [1.0, 0.0, 0.0], nan], vec![vec![0, 1, 2, 0]])
            .unwrap();
        let mesh = Mesh::new([crate::mesh::dummy_submesh(&[3]), sm]).unwrap();
        assert_eq!(
            Record::mesh(mesh).check_shape(),
            Err("mesh has non-finite coordinates")
        );

        assert_eq!(
            Record::point([0.0, 0.0, f64::NEG_INFINITY]).check_shape(),
            Err("point has non-finite coordinates")
        );
    }
}

use crate::*;

/// One face of a [`SubMesh`], as indices back into the sub-mesh vertices.
///
/// Faces are usually supplied as closed rings, that is the last index repeats the first.
pub type Face = Vec<u32>;

/// A single mesh: a vertex pool and the faces that index into it.
#[derive(Debug, PartialEq, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SubMesh {
    /// The vertex pool, indexed by the faces.
    vertices: Vec<Point3>,
    /// Each face is a run of indices into `vertices`.
    faces: Vec<Face>,
}

impl SubMesh {
    pub fn new(vertices: Vec<Point3>, faces: Vec<Face>) -> Result<Self, &'static str> {
        let len = vertices.len();
        if faces.iter().flatten().any(|&i| i as usize >= len) {
            return Err("face index out of bounds of the vertex pool");
        }

        let mut x = Self { vertices, faces };
        if x.face_runs().any(|f| f.len() < 3) {
            return Err("mesh face requires 3 or more vertices to be valid");
        }

        x.consolidate();
        Ok(x)
    }

    /// Ensures that there are **not** additional vertices that no face uses by removing
    /// them.
    ///
    /// Merged sub-meshes are offset past the highest index in use, so a vertex pool with
    /// unused trailing vertices would misalign every sub-mesh after it.
    pub fn consolidate(&mut self) {
        let len = self.vertices.len();
        let mut used = vec![false; len];
        for &i in self.faces.iter().flatten() {
            used[i as usize] = true;
        }

        if used.iter().all(|&u| u) {
            return;
        }

        // new index of each kept vertex
        let mut map = vec![0u32; len];
        let mut next = 0;
        for (i, _) in used.iter().enumerate().filter(|&(_, &u)| u) {
            map[i] = next;
            next += 1;
        }

        let mut i = 0;
        self.vertices.retain(|_| {
            i += 1;
            used[i - 1]
        });
        for x in self.faces.iter_mut().flatten() {
            *x = map[*x as usize];
        }
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_len(&self) -> usize {
        self.faces.len()
    }

    /// Each face's index run with the closing index dropped.
    pub fn face_runs(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.faces.iter().map(|f| match f.as_slice() {
            [first, .., last] if first == last => &f[..f.len() - 1],
            f => f,
        })
    }
}

impl Aabb for SubMesh {
    type Space = Point3;
    fn aabb(&self) -> Extents3 {
        self.vertices.iter().copied().collect()
    }
}

/// A composite mesh made of one or more [`SubMesh`]es.
///
/// This is the shape of multi-surface and multi-patch geometry, where each sub-mesh is a
/// logical part of one object.
#[derive(Debug, PartialEq, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Mesh(Vec<SubMesh>);

impl Mesh {
    pub fn new<I>(parts: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = SubMesh>,
    {
        let parts = parts.into_iter().collect::<Vec<_>>();
        if parts.is_empty() {
            Err("mesh requires at least one sub-mesh")
        } else {
            Ok(Mesh(parts))
        }
    }

    pub fn parts(&self) -> &[SubMesh] {
        &self.0
    }

    pub fn face_len(&self) -> usize {
        self.0.iter().map(SubMesh::face_len).sum()
    }
}

impl From<SubMesh> for Mesh {
    fn from(m: SubMesh) -> Self {
        Mesh(vec![m])
    }
}

impl Aabb for Mesh {
    type Space = Point3;
    fn aabb(&self) -> Extents3 {
        self.0.iter().map(Aabb::aabb).collect()
    }
}

#[cfg(test)]
pub(crate) fn dummy_submesh(face_sizes: &[usize]) -> SubMesh {
    // every face gets its own vertices, placed along x
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for &n in face_sizes {
        let start = vertices.len() as u32;
        vertices.extend((0..n).map(|i| [(start as usize + i) as f64, i as f64, 0.0]));
        let mut face = (start..start + n as u32).collect::<Vec<_>>();
        face.push(start);
        faces.push(face);
    }
    SubMesh::new(vertices, faces).unwrap()
}

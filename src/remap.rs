//! Merging of sub-mesh vertex indices into one index space.

/// Offset local indices past everything merged so far.
///
/// The first sub-mesh (`prior_max == None`) passes through unchanged. Later sub-meshes are
/// shifted by `prior_max + 1`.
pub fn remap(local: &[u32], prior_max: Option<u32>) -> Vec<u32> {
    match prior_max {
        None => local.to_vec(),
        Some(m) => local.iter().map(|i| i + m + 1).collect(),
    }
}

/// Accumulates indices from consecutive sub-meshes.
///
/// Each sub-mesh brings its own vertex pool, so the next sub-mesh starts after the
/// highest index seen so far.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndexRemapper {
    indices: Vec<u32>,
    max: Option<u32>,
}

impl IndexRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one sub-mesh's local indices, returning the global indices it was given.
    pub fn push(&mut self, local: &[u32]) -> &[u32] {
        let start = self.indices.len();
        let global = remap(local, self.max);
        if let Some(&m) = global.iter().max() {
            self.max = Some(self.max.map_or(m, |x| x.max(m)));
        }
        self.indices.extend(global);
        &self.indices[start..]
    }

    /// The highest global index so far.
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<u32> {
        self.indices
    }
}

use crate::vector::Vector;

/// A centroid and the dataset indices assigned to it in the current epoch.
///
/// Members are indices into the [`Dataset`](crate::Dataset) the cluster was
/// fitted on, not copies of the observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    centroid: Vector,
    members: Vec<usize>,
}

impl Cluster {
    /// New cluster seeded at `centroid` with no members.
    pub fn new(centroid: Vector) -> Self {
        Self {
            centroid,
            members: Vec::new(),
        }
    }

    pub fn centroid(&self) -> &Vector {
        &self.centroid
    }

    /// Dataset indices assigned in the last completed assignment pass.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn push_member(&mut self, index: usize) {
        self.members.push(index);
    }

    pub(crate) fn set_centroid(&mut self, centroid: Vector) {
        self.centroid = centroid;
    }

    /// Drop the membership, keeping the centroid.
    pub(crate) fn clear_members(&mut self) {
        self.members.clear();
    }
}

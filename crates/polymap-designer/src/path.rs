//! Editable vertex list of a rendered polygon.

use polymap_core::Coordinate;

use crate::error::{DesignerError, DesignerResult};

/// Which vertex mutation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathChange {
    SetAt(usize),
    InsertAt(usize),
    RemoveAt(usize),
}

impl PathChange {
    pub fn index(&self) -> usize {
        match self {
            PathChange::SetAt(i) | PathChange::InsertAt(i) | PathChange::RemoveAt(i) => *i,
        }
    }
}

/// Ordered polygon vertices supporting the widget's three edit gestures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditablePath {
    vertices: Vec<Coordinate>,
}

impl EditablePath {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Moves vertex `index` to `at`.
    pub fn set_at(&mut self, index: usize, at: Coordinate) -> DesignerResult<PathChange> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(DesignerError::VertexOutOfRange { index, len })?;
        *slot = at;
        Ok(PathChange::SetAt(index))
    }

    /// Inserts a vertex before `index`; `index == len` appends.
    pub fn insert_at(&mut self, index: usize, at: Coordinate) -> DesignerResult<PathChange> {
        if index > self.vertices.len() {
            return Err(DesignerError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        self.vertices.insert(index, at);
        Ok(PathChange::InsertAt(index))
    }

    pub fn remove_at(&mut self, index: usize) -> DesignerResult<PathChange> {
        if index >= self.vertices.len() {
            return Err(DesignerError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        self.vertices.remove(index);
        Ok(PathChange::RemoveAt(index))
    }
}

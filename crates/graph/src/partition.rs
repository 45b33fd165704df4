//! Communicating classes and the partition they form.

use std::fmt;

use crate::error::GraphError;

/// A strongly connected component: a set of mutually reachable vertices.
///
/// Members are kept in ascending vertex order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Class {
    id: usize,
    members: Vec<usize>,
}

impl Class {
    /// Creates an empty class with the given id.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    /// Creates a class from a list of vertices, sorting and deduplicating it.
    pub fn with_members(id: usize, mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        members.dedup();
        Self { id, members }
    }

    /// Returns the class id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the display name, `C1` for id 0.
    pub fn name(&self) -> String {
        format!("C{}", self.id + 1)
    }

    /// Adds a vertex. Adding a vertex twice has no effect.
    pub fn add_vertex(&mut self, vertex: usize) {
        if let Err(pos) = self.members.binary_search(&vertex) {
            self.members.insert(pos, vertex);
        }
    }

    /// Returns the member vertices in ascending order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns `true` if `vertex` belongs to this class.
    pub fn contains(&self, vertex: usize) -> bool {
        self.members.binary_search(&vertex).is_ok()
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the class has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.name())?;
        for (i, v) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

/// An ordered collection of classes covering a graph's vertices.
///
/// Class ids equal their position: the first class added has id 0. When
/// produced by [`strongly_connected_components`](crate::strongly_connected_components)
/// the order is reverse topological (sink classes first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    classes: Vec<Class>,
}

impl Partition {
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id the next added class will receive.
    pub fn next_class_id(&self) -> usize {
        self.classes.len()
    }

    /// Adds a class and returns its id.
    ///
    /// The class is re-stamped with [`next_class_id`](Self::next_class_id)
    /// so that ids stay contiguous.
    pub fn add_class(&mut self, mut class: Class) -> usize {
        let id = self.next_class_id();
        class.id = id;
        self.classes.push(class);
        id
    }

    /// Returns the class with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ClassOutOfRange`] if no such class exists.
    pub fn class(&self, id: usize) -> Result<&Class, GraphError> {
        self.classes.get(id).ok_or(GraphError::ClassOutOfRange {
            class: id,
            n_classes: self.classes.len(),
        })
    }

    /// Iterates classes by increasing id.
    pub fn iter(&self) -> std::slice::Iter<'_, Class> {
        self.classes.iter()
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the partition holds no class.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Builds the vertex-to-class table for a graph of `size` vertices.
    ///
    /// Entry `v - 1` holds the class id of vertex `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if a member lies outside
    /// `1..=size`, [`GraphError::DuplicateVertex`] if a vertex belongs to two
    /// classes, or [`GraphError::UncoveredVertex`] if it belongs to none.
    pub fn vertex_classes(&self, size: usize) -> Result<Vec<usize>, GraphError> {
        let mut table = vec![None; size];
        for class in &self.classes {
            for &v in class.members() {
                if v < 1 || v > size {
                    return Err(GraphError::VertexOutOfRange { vertex: v, size });
                }
                if let Some(first) = table[v - 1] {
                    return Err(GraphError::DuplicateVertex {
                        vertex: v,
                        first,
                        second: class.id(),
                    });
                }
                table[v - 1] = Some(class.id());
            }
        }
        table
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.ok_or(GraphError::UncoveredVertex { vertex: i + 1 }))
            .collect()
    }

    /// Drops every class. Calling this on an empty partition is a no-op.
    pub fn clear(&mut self) {
        self.classes.clear();
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Class;
    type IntoIter = std::slice::Iter<'a, Class>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            writeln!(f, "{class}")?;
        }
        Ok(())
    }
}

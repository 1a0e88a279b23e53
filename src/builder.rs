use std::collections::BTreeSet;

use crate::catalog::{BucketKey, Catalog};
use crate::classify::{classify, Classification};
use crate::error::GraphError;
use crate::graph::{is_cycle_edge, Adjacency, Edge};

use log::debug;

/// Smallest cycle the builder accepts
pub const MIN_VERTICES: usize = 3;
/// Largest cycle the builder accepts
pub const MAX_VERTICES: usize = 8;

/// Effect of toggling an edge
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    Added,
    Removed,
}

/// Effect of clicking on a vertex
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Click {
    /// The vertex is now selected
    Selected(usize),
    /// The selected vertex was clicked again
    Deselected,
    /// The edge between the selected and the clicked vertex was toggled
    Toggled(Edge, Toggle),
    /// The two vertices are neighbours on the cycle
    CycleEdge(Edge),
}

/// A cycle on `n` vertices with user-chosen chords
///
/// Edges are chosen by clicking first on one endpoint and then on
/// the other, as in an interactive editor.
///
/// # Example
///
/// ```rust
/// use chord_class::builder::{Click, GraphBuilder, Toggle};
/// use chord_class::catalog::Catalog;
/// use chord_class::graph::Edge;
///
/// let mut builder = GraphBuilder::new(5)?;
/// assert_eq!(builder.click(1)?, Click::Selected(1));
/// assert_eq!(builder.click(3)?, Click::Toggled(Edge::new(1, 3)?, Toggle::Added));
/// assert_eq!(builder.edge_count(), 6);
///
/// let catalog = Catalog::enumerate_chord_classes(5)?;
/// assert_eq!(builder.classify(&catalog).to_string(), "Class 1");
/// # Ok::<(), chord_class::error::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphBuilder {
    n: usize,
    added: BTreeSet<Edge>,
    selected: Option<usize>,
}

fn check_vertex_count(n: usize) -> Result<(), GraphError> {
    if !(MIN_VERTICES..=MAX_VERTICES).contains(&n) {
        return Err(GraphError::VertexCountOutOfRange {
            n,
            min: MIN_VERTICES,
            max: MAX_VERTICES,
        });
    }
    Ok(())
}

impl GraphBuilder {
    pub fn new(n: usize) -> Result<Self, GraphError> {
        check_vertex_count(n)?;
        Ok(Self {
            n,
            added: BTreeSet::new(),
            selected: None,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// The chords
    pub fn added_edges(&self) -> &BTreeSet<Edge> {
        &self.added
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Number of edges including the cycle
    pub fn edge_count(&self) -> usize {
        self.n + self.added.len()
    }

    pub fn key(&self) -> BucketKey {
        BucketKey::new(self.n, self.edge_count())
    }

    pub fn adjacency(&self) -> Adjacency {
        Adjacency::with_added_edges(self.n, self.added.iter().copied())
            .expect("builder only holds valid chords")
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex == 0 || vertex > self.n {
            return Err(GraphError::VertexOutOfRange { vertex, n: self.n });
        }
        Ok(())
    }

    /// Add the chord `a-b` if it is missing, otherwise remove it
    pub fn toggle_edge(&mut self, a: usize, b: usize) -> Result<Toggle, GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        let edge = Edge::new(a, b)?;
        if edge.is_cycle_edge(self.n) {
            return Err(GraphError::CycleEdge(a, b));
        }
        let res = if self.added.remove(&edge) {
            Toggle::Removed
        } else {
            self.added.insert(edge);
            Toggle::Added
        };
        debug!("{res:?} edge {edge}");
        Ok(res)
    }

    /// Select `v`, or toggle the edge to the previously selected vertex
    pub fn click(&mut self, v: usize) -> Result<Click, GraphError> {
        self.check_vertex(v)?;
        let Some(selected) = self.selected.take() else {
            self.selected = Some(v);
            return Ok(Click::Selected(v));
        };
        if selected == v {
            return Ok(Click::Deselected);
        }
        let edge = Edge::new(selected, v)?;
        if is_cycle_edge(selected, v, self.n) {
            return Ok(Click::CycleEdge(edge));
        }
        let toggle = self.toggle_edge(selected, v)?;
        Ok(Click::Toggled(edge, toggle))
    }

    /// Forget the selected vertex
    pub fn escape(&mut self) {
        self.selected = None;
    }

    /// Remove all chords
    pub fn clear(&mut self) {
        self.added.clear();
        self.selected = None;
    }

    /// Change the cycle length
    ///
    /// Chords that are not valid for the new length are dropped.
    pub fn set_vertex_count(&mut self, n: usize) -> Result<(), GraphError> {
        check_vertex_count(n)?;
        self.n = n;
        let before = self.added.len();
        self.added.retain(|e| {
            let (a, b) = e.endpoints();
            b <= n && !is_cycle_edge(a, b, n)
        });
        if self.added.len() != before {
            debug!("Dropped {} edges", before - self.added.len());
        }
        if self.selected.is_some_and(|v| v > n) {
            self.selected = None;
        }
        Ok(())
    }

    /// Compare the current graph with `catalog`
    pub fn classify(&self, catalog: &Catalog) -> Classification {
        classify(&self.adjacency(), self.n, catalog)
    }

    /// `"1 edge"` or `"k edges"` for the number of chords
    pub fn edge_label(&self) -> String {
        match self.added.len() {
            1 => "1 edge".to_owned(),
            k => format!("{k} edges"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn edge(a: usize, b: usize) -> Edge {
        Edge::new(a, b).unwrap()
    }

    #[test]
    fn vertex_counts() {
        assert!(GraphBuilder::new(2).is_err());
        assert!(GraphBuilder::new(9).is_err());
        for n in MIN_VERTICES..=MAX_VERTICES {
            let b = GraphBuilder::new(n).unwrap();
            assert_eq!(b.adjacency(), Adjacency::cycle(n).unwrap());
            assert_eq!(b.edge_count(), n);
        }
    }

    #[test]
    fn toggle() {
        log_init();

        let mut b = GraphBuilder::new(6).unwrap();
        assert_eq!(b.toggle_edge(4, 1), Ok(Toggle::Added));
        assert_eq!(b.toggle_edge(2, 5), Ok(Toggle::Added));
        assert_eq!(b.edge_label(), "2 edges");
        assert_eq!(b.key(), BucketKey::new(6, 8));
        assert_eq!(b.adjacency().edge_count(), 8);
        assert_eq!(b.toggle_edge(1, 4), Ok(Toggle::Removed));
        assert_eq!(b.edge_label(), "1 edge");
        assert_eq!(Vec::from_iter(b.added_edges().iter().copied()), [edge(2, 5)]);

        assert_eq!(b.toggle_edge(1, 2), Err(GraphError::CycleEdge(1, 2)));
        assert_eq!(b.toggle_edge(6, 1), Err(GraphError::CycleEdge(6, 1)));
        assert_eq!(b.toggle_edge(3, 3), Err(GraphError::SelfLoop(3)));
        assert_eq!(
            b.toggle_edge(3, 7),
            Err(GraphError::VertexOutOfRange { vertex: 7, n: 6 })
        );
        b.clear();
        assert_eq!(b.edge_label(), "0 edges");
    }

    #[test]
    fn clicks() {
        log_init();

        let mut b = GraphBuilder::new(5).unwrap();
        assert_eq!(b.click(2), Ok(Click::Selected(2)));
        assert_eq!(b.selected(), Some(2));
        assert_eq!(b.click(2), Ok(Click::Deselected));
        assert_eq!(b.selected(), None);

        assert_eq!(b.click(2), Ok(Click::Selected(2)));
        assert_eq!(b.click(3), Ok(Click::CycleEdge(edge(2, 3))));
        assert_eq!(b.selected(), None);
        assert!(b.added_edges().is_empty());

        assert_eq!(b.click(5), Ok(Click::Selected(5)));
        assert_eq!(b.click(2), Ok(Click::Toggled(edge(2, 5), Toggle::Added)));
        assert_eq!(b.click(2), Ok(Click::Selected(2)));
        assert_eq!(b.click(5), Ok(Click::Toggled(edge(2, 5), Toggle::Removed)));
        assert!(b.added_edges().is_empty());

        assert_eq!(b.click(4), Ok(Click::Selected(4)));
        b.escape();
        assert_eq!(b.selected(), None);
        assert!(b.click(6).is_err());
    }

    #[test]
    fn shrink() {
        log_init();

        let mut b = GraphBuilder::new(8).unwrap();
        for (u, v) in [(1, 3), (1, 7), (2, 6), (4, 8), (5, 7)] {
            b.toggle_edge(u, v).unwrap();
        }
        b.click(8).unwrap();
        b.set_vertex_count(7).unwrap();
        // 1-7 is on the 7-cycle, 4-8 and the selection are gone
        assert_eq!(
            Vec::from_iter(b.added_edges().iter().copied()),
            [edge(1, 3), edge(2, 6), edge(5, 7)]
        );
        assert_eq!(b.selected(), None);
        assert_eq!(b.edge_count(), 10);
        assert!(b.set_vertex_count(2).is_err());
        assert_eq!(b.vertex_count(), 7);

        b.set_vertex_count(8).unwrap();
        assert_eq!(b.added_edges().len(), 3);
    }

    #[test]
    fn classify_builder() {
        log_init();

        let catalog = Catalog::enumerate_chord_classes(6).unwrap();
        let mut b = GraphBuilder::new(6).unwrap();
        assert_eq!(b.classify(&catalog), Classification::NotAttempted);
        b.toggle_edge(1, 4).unwrap();
        b.toggle_edge(2, 5).unwrap();
        let res = b.classify(&catalog);
        let mapping = res.mapping().unwrap();
        assert!(mapping.is_isomorphism(&b.adjacency(), res.candidate().unwrap()));
        assert_eq!(b.classify(&Catalog::new()), Classification::Novel);
    }
}

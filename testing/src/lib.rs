use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use rand::{
    distributions::Uniform,
    prelude::*
};
use rand_distr::Normal;
use rand_xoshiro::Xoshiro256Plus;

/// Random cycles with chords
///
/// Node `i` lies on the cycle between `i - 1` and `i + 1`
/// (mod the node count), every other pair is a chord with some
/// probability.
pub struct ChordGraphIter {
    rng: Xoshiro256Plus,
    pub node_distr: Uniform<usize>,
    chord_distr: Normal<f64>,
}

impl Default for ChordGraphIter {
    fn default() -> Self {
        Self {
            rng: Xoshiro256Plus::seed_from_u64(0),
            node_distr: Uniform::from(3..9),
            chord_distr: Normal::new(0.3, 0.6).unwrap(),
        }
    }
}

impl ChordGraphIter {
    pub fn with_nodes(nnodes: usize) -> Self {
        Self {
            node_distr: Uniform::from(nnodes..nnodes + 1),
            ..Default::default()
        }
    }
}

impl Iterator for ChordGraphIter {
    type Item = UnGraph<(), ()>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rng = &mut self.rng;
        let nnodes = self.node_distr.sample(&mut rng);
        let mut g = UnGraph::with_capacity(nnodes, 2 * nnodes);
        for _ in 0..nnodes {
            g.add_node(());
        }
        for i in 0..nnodes {
            g.add_edge(NodeIndex::new(i), NodeIndex::new((i + 1) % nnodes), ());
        }
        for i in 0..nnodes {
            for j in (i + 2)..nnodes {
                if i == 0 && j == nnodes - 1 {
                    continue;
                }
                let chord = self.chord_distr.sample(&mut rng)
                    .clamp(0.0, 1.0)
                    .round() as u64;
                if chord == 1 {
                    g.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
                }
            }
        }
        Some(g)
    }
}

/// The same graph with node indices shuffled
pub fn randomize_labels<R: Rng>(
    g: UnGraph<(), ()>,
    rng: &mut R,
) -> UnGraph<(), ()> {
    let mut relabel = Vec::from_iter(0..g.node_count());
    relabel.shuffle(rng);
    let mut gg = UnGraph::with_capacity(g.node_count(), g.edge_count());
    for _ in 0..g.node_count() {
        gg.add_node(());
    }
    for e in g.edge_references() {
        let source = relabel[e.source().index()];
        let target = relabel[e.target().index()];
        gg.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
    }
    gg
}

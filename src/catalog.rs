use std::fmt::{self, Display};
#[cfg(feature = "serde")]
use std::{collections::BTreeMap, io::Read, path::Path};

#[cfg(feature = "serde")]
use crate::error::CatalogError;
use crate::error::GraphError;
use crate::graph::{is_cycle_edge, Adjacency, Edge};
use crate::iso::find_isomorphism;

use ahash::AHashMap;
use itertools::Itertools;
use log::debug;
#[cfg(feature = "serde")]
use log::warn;

/// Largest cycle for [Catalog::enumerate_chord_classes]
pub const MAX_ENUMERATION_VERTICES: usize = 7;

/// Vertex and edge count shared by all graphs in a bucket
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketKey {
    pub vertices: usize,
    pub edges: usize,
}

impl BucketKey {
    pub fn new(vertices: usize, edges: usize) -> Self {
        Self { vertices, edges }
    }
}

impl From<&Adjacency> for BucketKey {
    fn from(g: &Adjacency) -> Self {
        Self::new(g.vertex_count(), g.edge_count())
    }
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}, edges={}", self.vertices, self.edges)
    }
}

/// Reference graphs, grouped by vertex and edge count
///
/// Within each bucket the graphs keep the order in which they were
/// inserted. This order decides which entry a graph is matched
/// against first.
///
/// # Example
///
/// ```rust
/// use chord_class::catalog::{BucketKey, Catalog};
/// use chord_class::graph::{Adjacency, Edge};
///
/// let catalog = Catalog::from_iter([
///     Adjacency::with_added_edges(5, [Edge::new(2, 5)?])?,
/// ]);
/// assert_eq!(catalog.bucket(BucketKey::new(5, 6)).len(), 1);
/// assert!(catalog.bucket(BucketKey::new(5, 7)).is_empty());
/// # Ok::<(), chord_class::error::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    buckets: AHashMap<BucketKey, Vec<Adjacency>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `g` to the bucket matching its size
    ///
    /// Returns the bucket key and the position of `g` in the bucket.
    pub fn insert(&mut self, g: Adjacency) -> (BucketKey, usize) {
        let key = BucketKey::from(&g);
        let bucket = self.buckets.entry(key).or_default();
        bucket.push(g);
        (key, bucket.len() - 1)
    }

    /// All graphs with the given size, empty if there are none
    pub fn bucket(&self, key: BucketKey) -> &[Adjacency] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of graphs
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Keys of all non-empty buckets in increasing order
    pub fn keys(&self) -> impl Iterator<Item = BucketKey> + '_ {
        self.buckets
            .iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(k, _)| *k)
            .sorted()
    }

    /// Non-empty buckets ordered by their keys
    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, &[Adjacency])> + '_ {
        self.keys().map(|k| (k, self.bucket(k)))
    }

    /// One representative for each class of `n`-cycles with chords
    ///
    /// Chord sets are visited in increasing order when read as binary
    /// numbers, with chord `i` in the lexicographic list of all chords
    /// corresponding to bit `i`. The first member found of each
    /// isomorphism class is kept. Graphs without any chords are not
    /// included.
    pub fn enumerate_chord_classes(n: usize) -> Result<Self, GraphError> {
        if !(3..=MAX_ENUMERATION_VERTICES).contains(&n) {
            return Err(GraphError::VertexCountOutOfRange {
                n,
                min: 3,
                max: MAX_ENUMERATION_VERTICES,
            });
        }
        let chords = (1..=n)
            .tuple_combinations()
            .filter(|&(a, b)| !is_cycle_edge(a, b, n))
            .map(|(a, b)| Edge::new(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{} chords in the {n}-cycle", chords.len());
        let mut res = Self::new();
        for subset in 1u32..(1 << chords.len()) {
            let selected = chords
                .iter()
                .enumerate()
                .filter(|(i, _)| subset & (1 << i) != 0)
                .map(|(_, e)| *e);
            let g = Adjacency::with_added_edges(n, selected)?;
            let known = res
                .bucket(BucketKey::from(&g))
                .iter()
                .any(|h| find_isomorphism(&g, h, n).is_some());
            if !known {
                res.insert(g);
            }
        }
        debug!("Found {} classes for n = {n}", res.len());
        Ok(res)
    }
}

impl FromIterator<Adjacency> for Catalog {
    fn from_iter<I: IntoIterator<Item = Adjacency>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl Extend<Adjacency> for Catalog {
    fn extend<I: IntoIterator<Item = Adjacency>>(&mut self, iter: I) {
        for g in iter {
            self.insert(g);
        }
    }
}

// vertex count -> edge count -> graphs, with all numbers as strings
#[cfg(feature = "serde")]
type RawCatalog = BTreeMap<String, BTreeMap<String, Vec<RawGraph>>>;
#[cfg(feature = "serde")]
type RawGraph = BTreeMap<String, Vec<String>>;

#[cfg(feature = "serde")]
fn parse_label(s: &str) -> Result<usize, CatalogError> {
    // only canonical decimals, so distinct keys never name the same bucket
    match s.parse::<usize>() {
        Ok(n) if n.to_string() == s => Ok(n),
        _ => Err(CatalogError::Key(s.to_owned())),
    }
}

#[cfg(feature = "serde")]
fn lists_from_raw(raw: RawGraph) -> Result<Vec<(usize, Vec<usize>)>, CatalogError> {
    let mut lists = Vec::with_capacity(raw.len());
    for (v, nbrs) in raw {
        let nbrs: Vec<usize> = nbrs
            .iter()
            .map(|w| parse_label(w))
            .collect::<Result<_, _>>()?;
        lists.push((parse_label(&v)?, nbrs));
    }
    Ok(lists)
}

#[cfg(feature = "serde")]
impl Catalog {
    /// Read a catalog in JSON format
    ///
    /// The format is a map from vertex counts to maps from edge
    /// counts to lists of graphs. Each graph maps vertex labels to
    /// lists of neighbours. All numbers are given as strings:
    ///
    /// ```rust
    /// use chord_class::catalog::{BucketKey, Catalog};
    ///
    /// let json = r#"{"4": {"5": [
    ///     {"1": ["2", "3", "4"], "2": ["1", "3"], "3": ["1", "2", "4"], "4": ["1", "3"]}
    /// ]}}"#;
    /// let catalog = Catalog::from_json_str(json)?;
    /// assert_eq!(catalog.bucket(BucketKey::new(4, 5)).len(), 1);
    /// # Ok::<(), chord_class::error::CatalogError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Load a catalog, falling back to an empty one on any failure
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                debug!("Loaded {} graphs from {}", catalog.len(), path.display());
                catalog
            }
            Err(err) => {
                warn!("Failed to load catalog from {}: {err}", path.display());
                Self::new()
            }
        }
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        let mut res = Self::new();
        for (n, buckets) in raw {
            let n = parse_label(&n)?;
            for (edges, graphs) in buckets {
                let edges = parse_label(&edges)?;
                for (index, graph) in graphs.into_iter().enumerate() {
                    let g = Adjacency::from_neighbor_lists(lists_from_raw(graph)?)
                        .map_err(|source| CatalogError::Entry { n, edges, index, source })?;
                    if g.vertex_count() != n || g.edge_count() != edges {
                        return Err(CatalogError::WrongBucket {
                            n,
                            edges,
                            index,
                            actual_n: g.vertex_count(),
                            actual_edges: g.edge_count(),
                        });
                    }
                    res.insert(g);
                }
            }
        }
        Ok(res)
    }

    fn to_raw(&self) -> RawCatalog {
        let mut raw = RawCatalog::new();
        for (key, graphs) in self.iter() {
            let graphs = Vec::from_iter(graphs.iter().map(|g| {
                RawGraph::from_iter(g.iter().map(|(v, nbrs)| {
                    (v.to_string(), Vec::from_iter(nbrs.iter().map(|w| w.to_string())))
                }))
            }));
            raw.entry(key.vertices.to_string())
                .or_default()
                .insert(key.edges.to_string(), graphs);
        }
        raw
    }

    /// Write the catalog in the format read by [Catalog::from_json_str]
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(&self.to_raw())?)
    }
}

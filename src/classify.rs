use std::fmt::{self, Display};

use crate::catalog::{BucketKey, Catalog};
use crate::graph::Adjacency;
use crate::error::SearchError;
use crate::iso::{find_matrix_isomorphism, SearchOptions, DEFAULT_MAX_SEARCH_VERTICES};
use crate::mapping::Mapping;
use crate::matrix::AdjMatrix;

use log::{debug, trace, warn};

/// Outcome of comparing a graph with a catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The graph has no edges besides the base cycle
    NotAttempted,
    /// No graph in the catalog is isomorphic
    Novel,
    /// The first isomorphic catalog entry
    Matched {
        /// Position of the entry in its bucket
        index: usize,
        /// The matching catalog entry
        candidate: Adjacency,
        /// Isomorphism from the classified graph to `candidate`
        mapping: Mapping,
    },
}

impl Classification {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// One-based class number for display
    pub fn class_number(&self) -> Option<usize> {
        match self {
            Self::Matched { index, .. } => Some(index + 1),
            _ => None,
        }
    }

    pub fn mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Matched { mapping, .. } => Some(mapping),
            _ => None,
        }
    }

    pub fn candidate(&self) -> Option<&Adjacency> {
        match self {
            Self::Matched { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttempted => Ok(()),
            Self::Novel => write!(f, "None — new class found."),
            Self::Matched { index, .. } => write!(f, "Class {}", index + 1),
        }
    }
}

/// Look up the `n`-cycle with chords `current` in `catalog`
///
/// The catalog entries with the same vertex and edge count are tried
/// in order and the first isomorphic one is reported, together with
/// an explicit isomorphism. Graphs without chords, or with a vertex
/// count other than `n`, are not classified. There is a warning for
/// graphs larger than [DEFAULT_MAX_SEARCH_VERTICES]; use
/// [classify_with] to reject them instead.
///
/// # Example
///
/// ```rust
/// use chord_class::prelude::*;
///
/// let catalog = Catalog::from_iter([
///     Adjacency::with_added_edges(5, [Edge::new(2, 5)?])?,
/// ]);
/// let current = Adjacency::with_added_edges(5, [Edge::new(1, 3)?])?;
/// let res = classify(&current, 5, &catalog);
/// assert_eq!(res.class_number(), Some(1));
/// assert_eq!(res.mapping().unwrap().to_string(), "1 ↦ 2, 2 ↦ 1, 3 ↦ 5, 4 ↦ 4, 5 ↦ 3");
///
/// let cycle = Adjacency::cycle(5)?;
/// assert_eq!(classify(&cycle, 5, &catalog), Classification::NotAttempted);
/// # Ok::<(), chord_class::error::GraphError>(())
/// ```
pub fn classify(current: &Adjacency, n: usize, catalog: &Catalog) -> Classification {
    if n > DEFAULT_MAX_SEARCH_VERTICES {
        warn!("Classifying a graph with {n} vertices, this may take a long time");
    }
    let opt = SearchOptions { max_vertices: usize::MAX };
    classify_with(current, n, catalog, &opt)
        .expect("unbounded search cannot refuse a graph")
}

/// Like [classify], with explicit search limits
///
/// Graphs with more than `opt.max_vertices` vertices are rejected
/// before any candidate is tried.
pub fn classify_with(
    current: &Adjacency,
    n: usize,
    catalog: &Catalog,
    opt: &SearchOptions,
) -> Result<Classification, SearchError> {
    if current.vertex_count() != n {
        warn!(
            "Not classifying graph with {} vertices as a {n}-cycle",
            current.vertex_count()
        );
        return Ok(Classification::NotAttempted);
    }
    if current.added_edges(n).is_empty() {
        debug!("No chords, not classifying");
        return Ok(Classification::NotAttempted);
    }
    if n > opt.max_vertices {
        return Err(SearchError::TooManyVertices {
            n,
            max: opt.max_vertices,
        });
    }
    let key = BucketKey::new(n, current.edge_count());
    let bucket = catalog.bucket(key);
    debug!("Classifying against {} graphs with {key}", bucket.len());
    let matrix = AdjMatrix::from(current);
    for (index, candidate) in bucket.iter().enumerate() {
        trace!("Trying candidate {index}: {candidate:?}");
        let (res, stats) = find_matrix_isomorphism(&matrix, &candidate.to_matrix(), opt)?;
        if let Some(mapping) = res {
            debug!("Matched candidate {index} with {mapping} ({stats:?})");
            return Ok(Classification::Matched {
                index,
                candidate: candidate.clone(),
                mapping,
            });
        }
        trace!("No isomorphism ({stats:?})");
    }
    debug!("New class");
    Ok(Classification::Novel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use std::collections::BTreeSet;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn chorded(n: usize, chords: &[(usize, usize)]) -> Adjacency {
        let chords = chords.iter().map(|&(a, b)| Edge::new(a, b).unwrap());
        Adjacency::with_added_edges(n, chords).unwrap()
    }

    #[test]
    fn not_attempted() {
        log_init();

        let full = Catalog::enumerate_chord_classes(4).unwrap();
        for catalog in [Catalog::new(), full] {
            let res = classify(&chorded(4, &[]), 4, &catalog);
            assert_eq!(res, Classification::NotAttempted);
            assert_eq!(res.to_string(), "");
            assert_eq!(res.class_number(), None);
        }
    }

    #[test]
    fn single_chord() {
        log_init();

        let catalog = Catalog::from_iter([chorded(5, &[(2, 5)])]);
        let current = chorded(5, &[(1, 3)]);
        assert_eq!(current.edge_count(), 6);
        let res = classify(&current, 5, &catalog);
        let Classification::Matched { index, candidate, mapping } = &res else {
            panic!("no match: {res:?}")
        };
        assert_eq!(*index, 0);
        assert_eq!(candidate, &chorded(5, &[(2, 5)]));
        assert!(mapping.is_isomorphism(&current, candidate));
        let chord = Edge::new(mapping.image(1).unwrap(), mapping.image(3).unwrap());
        assert_eq!(candidate.added_edges(5), BTreeSet::from([chord.unwrap()]));
        assert_eq!(res.to_string(), "Class 1");
    }

    #[test]
    fn first_match_wins() {
        log_init();

        // chords sharing a vertex, then two pairs of crossing chords
        let catalog = Catalog::from_iter([
            chorded(5, &[(1, 3), (1, 4)]),
            chorded(5, &[(1, 3), (2, 4)]),
            chorded(5, &[(2, 4), (3, 5)]),
        ]);
        let sharing = chorded(5, &[(2, 5), (3, 5)]);
        let res = classify(&sharing, 5, &catalog);
        assert_eq!(res.class_number(), Some(1));

        let crossing = chorded(5, &[(1, 4), (2, 5)]);
        let res = classify(&crossing, 5, &catalog);
        assert_eq!(res.class_number(), Some(2));
        assert_eq!(res.candidate(), Some(&chorded(5, &[(1, 3), (2, 4)])));
    }

    #[test]
    fn novel() {
        log_init();

        let catalog = Catalog::from_iter([
            chorded(6, &[(1, 3), (4, 6)]),
            chorded(6, &[(1, 3), (1, 5)]),
        ]);
        let current = chorded(6, &[(1, 4), (2, 5)]);
        assert_eq!(current.edge_count(), 8);
        let res = classify(&current, 6, &catalog);
        assert_eq!(res, Classification::Novel);
        assert_eq!(res.to_string(), "None — new class found.");
        assert!(!res.is_match());
        assert_eq!(res.mapping(), None);

        // wrong bucket
        let res = classify(&chorded(6, &[(1, 4)]), 6, &catalog);
        assert_eq!(res, Classification::Novel);
        let res = classify(&current, 6, &Catalog::new());
        assert_eq!(res, Classification::Novel);
    }

    #[test]
    fn matches_full_enumeration() {
        log_init();

        for n in 4..=6 {
            let catalog = Catalog::enumerate_chord_classes(n).unwrap();
            for (key, bucket) in catalog.iter() {
                for (index, g) in bucket.iter().enumerate() {
                    let res = classify(g, n, &catalog);
                    assert_eq!(res.class_number(), Some(index + 1), "{key}");
                    assert!(res.mapping().unwrap().is_identity());
                }
            }
        }
    }

    #[test]
    fn oversized_graph_rejected() {
        log_init();

        let catalog = Catalog::from_iter([chorded(5, &[(2, 5)])]);
        let current = chorded(5, &[(1, 3)]);
        let opt = SearchOptions { max_vertices: 4 };
        assert_eq!(
            classify_with(&current, 5, &catalog, &opt),
            Err(SearchError::TooManyVertices { n: 5, max: 4 })
        );
        // refused even without candidates
        assert_eq!(
            classify_with(&current, 5, &Catalog::new(), &opt),
            Err(SearchError::TooManyVertices { n: 5, max: 4 })
        );
        // no chords, nothing to search
        assert_eq!(
            classify_with(&chorded(5, &[]), 5, &catalog, &opt),
            Ok(Classification::NotAttempted)
        );
    }

    #[test]
    fn large_graph_matches_itself() {
        log_init();

        let current = chorded(11, &[(1, 3)]);
        let catalog = Catalog::from_iter([current.clone()]);
        let opt = SearchOptions::default();
        assert_eq!(
            classify_with(&current, 11, &catalog, &opt),
            Err(SearchError::TooManyVertices { n: 11, max: 10 })
        );
        let res = classify(&current, 11, &catalog);
        assert_eq!(res.class_number(), Some(1));
        assert!(res.mapping().unwrap().is_identity());
    }

    #[test]
    fn vertex_count_mismatch() {
        log_init();

        let catalog = Catalog::enumerate_chord_classes(6).unwrap();
        let cycle = chorded(5, &[]);
        assert_eq!(classify(&cycle, 6, &catalog), Classification::NotAttempted);
        let current = chorded(5, &[(1, 3)]);
        assert_eq!(classify(&current, 6, &catalog), Classification::NotAttempted);
    }
}

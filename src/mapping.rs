use std::convert::TryFrom;
use std::fmt::{self, Display};

use crate::error::MappingError;
use crate::graph::Adjacency;

use itertools::Itertools;

/// Bijection between the vertices `1..=n` of two graphs
///
/// Vertex `i` is mapped to `images()[i - 1]`. A `Mapping` is always
/// a permutation of `1..=n`.
///
/// # Example
///
/// ```rust
/// use chord_class::mapping::Mapping;
///
/// let p = Mapping::new(vec![2, 3, 1])?;
/// assert_eq!(p.image(1), Some(2));
/// assert_eq!(p.to_string(), "1 ↦ 2, 2 ↦ 3, 3 ↦ 1");
/// assert!(Mapping::new(vec![1, 1, 3]).is_err());
/// # Ok::<(), chord_class::error::MappingError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mapping(Vec<usize>);

impl Mapping {
    /// Check that `images` is a permutation of `1..=images.len()`
    pub fn new(images: Vec<usize>) -> Result<Self, MappingError> {
        let n = images.len();
        let mut preimage = vec![0; n + 1];
        for (vertex, &image) in (1..).zip(&images) {
            if image == 0 || image > n {
                return Err(MappingError::OutOfRange { vertex, image, n });
            }
            if preimage[image] != 0 {
                return Err(MappingError::Duplicate {
                    image,
                    first: preimage[image],
                    second: vertex,
                });
            }
            preimage[image] = vertex;
        }
        Ok(Self(images))
    }

    /// Like [Mapping::new], but also require exactly `n` images
    pub fn with_vertex_count(
        images: Vec<usize>,
        n: usize,
    ) -> Result<Self, MappingError> {
        if images.len() != n {
            return Err(MappingError::Length {
                len: images.len(),
                n,
            });
        }
        Self::new(images)
    }

    pub(crate) fn from_permutation(images: Vec<usize>) -> Self {
        debug_assert!(Self::new(images.clone()).is_ok());
        Self(images)
    }

    pub fn identity(n: usize) -> Self {
        Self(Vec::from_iter(1..=n))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        (1..).zip(&self.0).all(|(i, &p)| i == p)
    }

    /// Image of `v`, `None` if `v` is not in `1..=n`
    pub fn image(&self, v: usize) -> Option<usize> {
        v.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    pub fn images(&self) -> &[usize] {
        &self.0
    }

    /// Pairs `(v, image of v)` for `v = 1..=n`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..).zip(self.0.iter().copied())
    }

    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.len()];
        for (v, p) in self.iter() {
            inv[p - 1] = v;
        }
        Self(inv)
    }

    /// Relabel `g`: vertex `v` becomes the image of `v`
    ///
    /// # Panics
    ///
    /// Panics if the vertex counts differ.
    pub fn apply(&self, g: &Adjacency) -> Adjacency {
        assert_eq!(self.len(), g.vertex_count());
        let edges = g.edges().map(|e| {
            let (a, b) = e.endpoints();
            (self.0[a - 1], self.0[b - 1])
        });
        Adjacency::from_edges(self.len(), edges)
            .expect("relabelling a valid graph gives a valid graph")
    }

    /// Check that `a` and `b` are adjacent exactly when their images are
    pub fn is_isomorphism(&self, from: &Adjacency, to: &Adjacency) -> bool {
        let n = self.len();
        if from.vertex_count() != n || to.vertex_count() != n {
            return false;
        }
        self.iter().all(|(u, pu)| {
            self.iter()
                .all(|(v, pv)| from.is_adjacent(u, v) == to.is_adjacent(pu, pv))
        })
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl TryFrom<Vec<usize>> for Mapping {
    type Error = MappingError;

    fn try_from(images: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(images)
    }
}

impl From<Mapping> for Vec<usize> {
    fn from(m: Mapping) -> Self {
        m.0
    }
}

impl Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_mapping(self).iter().join(", "))
    }
}

/// One `"v ↦ image"` line for each vertex, in order
pub fn format_mapping(mapping: &Mapping) -> Vec<String> {
    Vec::from_iter(mapping.iter().map(|(v, p)| format!("{v} ↦ {p}")))
}

/// Format raw images after checking they describe a bijection on `1..=n`
pub fn format_images(
    images: &[usize],
    n: usize,
) -> Result<Vec<String>, MappingError> {
    let mapping = Mapping::with_vertex_count(images.to_vec(), n)?;
    Ok(format_mapping(&mapping))
}

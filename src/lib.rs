//! Classify cycles with chords.
//!
//! A graph is built from the cycle on the vertices `1..=n` by adding
//! chords. It is then compared with a [catalog](catalog::Catalog) of
//! reference graphs with the same number of vertices and edges. If
//! one of them is isomorphic, the result includes an explicit
//! [vertex mapping](mapping::Mapping) witnessing the isomorphism.
//!
//! The isomorphism test is a backtracking search over vertex
//! permutations. Its running time grows factorially with the number
//! of vertices, so it is only meant for small graphs.
//!
//! # Example
//!
//! ```rust
//! use chord_class::prelude::*;
//!
//! // all ways to add chords to a 5-cycle, up to isomorphism
//! let catalog = Catalog::enumerate_chord_classes(5)?;
//!
//! let mut g = GraphBuilder::new(5)?;
//! g.toggle_edge(2, 4)?;
//! g.toggle_edge(3, 5)?;
//!
//! let res = g.classify(&catalog);
//! assert_eq!(res.to_string(), "Class 2");
//! let mapping = res.mapping().unwrap();
//! assert!(mapping.is_isomorphism(&g.adjacency(), res.candidate().unwrap()));
//! # Ok::<(), chord_class::error::GraphError>(())
//! ```
//!
//! # Features
//!
//! * `serde`: Enables reading and writing [catalogs](catalog::Catalog)
//!            in JSON format and serialisation of
//!            [mappings](mapping::Mapping) using
//!            [serde](https://crates.io/crates/serde).
//!            Enabled by default. `serde-1` is an alias.
pub mod builder;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod graph;
pub mod iso;
pub mod mapping;
pub mod matrix;
pub mod prelude;

pub use classify::{classify, Classification};
pub use iso::{find_isomorphism, try_find_isomorphism};
pub use mapping::format_mapping;

pub use crate::builder::GraphBuilder;
pub use crate::catalog::{BucketKey, Catalog};
pub use crate::classify::{classify, Classification};
pub use crate::graph::{Adjacency, Edge};
pub use crate::iso::{find_isomorphism, FindIsomorphism, TryFindIsomorphism};
pub use crate::mapping::{format_mapping, Mapping};

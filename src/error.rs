use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GraphError {
    #[error("Need at least 3 vertices for a cycle, got {0}")]
    TooFewVertices(usize),
    #[error("Vertex count {n} outside of {min}..={max}")]
    VertexCountOutOfRange { n: usize, min: usize, max: usize },
    #[error("Vertex {vertex} outside of 1..={n}")]
    VertexOutOfRange { vertex: usize, n: usize },
    #[error("Self-loop at vertex {0}")]
    SelfLoop(usize),
    #[error("Edge {0}-{1} is part of the base cycle")]
    CycleEdge(usize, usize),
    #[error("Vertex {0} lists {1} as a neighbour, but not the other way around")]
    Asymmetric(usize, usize),
    #[error("Vertex labels must be 1..={n}, missing {missing}")]
    MissingVertex { missing: usize, n: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SearchError {
    #[error("Too many vertices: {n} > {max}")]
    TooManyVertices { n: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MappingError {
    #[error("Mapping has length {len}, expected {n}")]
    Length { len: usize, n: usize },
    #[error("Image {image} of vertex {vertex} outside of 1..={n}")]
    OutOfRange { vertex: usize, image: usize, n: usize },
    #[error("Vertex {image} is the image of both {first} and {second}")]
    Duplicate { image: usize, first: usize, second: usize },
}

#[cfg(feature = "serde")]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not a vertex or edge count: {0:?}")]
    Key(String),
    #[error("Entry {index} of bucket n={n}, edges={edges}: {source}")]
    Entry {
        n: usize,
        edges: usize,
        index: usize,
        #[source]
        source: GraphError,
    },
    #[error(
        "Entry {index} of bucket n={n}, edges={edges} has {actual_n} vertices and {actual_edges} edges"
    )]
    WrongBucket {
        n: usize,
        edges: usize,
        index: usize,
        actual_n: usize,
        actual_edges: usize,
    },
}

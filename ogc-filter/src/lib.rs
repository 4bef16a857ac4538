//! Filter trees in the OGC Filter Encoding model, the feature schema metadata
//! needed to interpret them, and an ECQL parser producing them.

pub mod ast;
pub mod cql;
pub mod errors;
pub mod schema;
pub mod temporal;

pub use ast::{
    ArithmeticOp, Between, CompareOp, Comparison, Distance, Expression, Filter, FilterKind, Like,
    Literal, Spatial, SpatialOp, Temporal, TemporalOp,
};
pub use errors::{CqlError, SchemaError};
pub use geo_types;
pub use schema::{AttributeDescriptor, AttributeType, FeatureSchema, GeometryKind, SchemaProvider};
pub use temporal::TemporalValue;

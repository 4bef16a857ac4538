//! Compiles OGC filters into Elasticsearch query DSL.

pub mod capabilities;
pub mod coercion;
pub mod config;
pub mod date_format;
pub mod encoder;
pub mod errors;
pub mod like_pattern;
pub mod query;
pub mod spatial;
pub mod temporal;
pub mod view_params;

pub use capabilities::Capabilities;
pub use config::{EncoderConfig, LikeMode};
pub use encoder::{FilterToElastic, Query};
pub use errors::EncodeError;
pub use query::{QueryFragment, ScoreMode};
pub use view_params::Aggregations;

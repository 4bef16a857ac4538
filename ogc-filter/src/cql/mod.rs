//! ECQL text parsing.
//!
//! Supported syntax:
//! - Comparisons: `attr = 'x'`, `attr <> 1`, `attr >= 2.5`, `"quoted attr" < 1970-01-01`
//! - Ranges and patterns: `attr BETWEEN 1 AND 5`, `attr LIKE 'ab%'`, `attr ILIKE '_b%'`
//! - Null checks: `attr IS NULL`, `attr IS NOT NULL`
//! - Membership: `attr IN (1, 2)`, feature ids with `IN ('fid.1', 'fid.2')`
//! - Spatial: `INTERSECTS(geom, POINT(1 2))`, `BBOX(geom, 0, 0, 1, 1)`,
//!   `DWITHIN(geom, POINT(0 0), 10, meters)`
//! - Temporal: `attr AFTER 2006-11-30T01:30:00Z`, `attr DURING <instant>/<instant>`
//! - `INCLUDE`, `EXCLUDE`, `AND`, `OR`, `NOT` and parentheses

mod parser;

pub use parser::parse;

#[cfg(test)]
mod tests;

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation target ("/characters/42?tab=bio")
//!     → location.rs (split path / query / hash, strip base)
//!     → table.rs (scan routes in declaration order)
//!     → pattern.rs (segment-wise match, extract params)
//!     → Return: Matched(route, params) or NotFound(fallback view)
//!
//! Reverse lookup:
//!     route name + params
//!     → table.rs (name index)
//!     → pattern.rs (substitute and encode params)
//!     → concrete path
//!
//! Table construction (at startup / reload):
//!     RouteConfig[]
//!     → Parse patterns
//!     → Reject duplicate names and overlapping paths
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Tables are immutable; reload swaps in a new one
//! - No regex (segment comparison only)
//! - Deterministic: first declared match wins
//! - Unmatched paths resolve to a configurable not-found view

pub mod error;
pub mod history;
pub mod location;
pub mod pattern;
pub mod table;

pub use error::{PatternError, ResolveError, RouteTableError};
pub use history::{HistoryEntry, Navigator};
pub use location::Location;
pub use pattern::{MatchOptions, Params, PathPattern};
pub use table::{Navigation, NotFoundView, ResolvedRoute, RouteDefinition, RouteTable, TableOptions, ViewId};

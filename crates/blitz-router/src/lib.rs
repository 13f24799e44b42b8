//! # Blitz Router
//!
//! File-system based route resolution for Blitz-style projects:
//! - Static routes (`pages/post/create.tsx` → `/post/create`)
//! - Dynamic segments (`pages/post/[pid].tsx` → `/post/[pid]`)
//! - Catch-all segments (`pages/post/[...slug].tsx`)
//! - Optional catch-all segments (`pages/post/[[...slug]].tsx`)
//! - API routes (`pages/api/**`, `app/**/api/**`) and RPC resolvers
//!   (`app/**/queries/*`, `app/**/mutations/*`)
//!
//! ## Precedence
//!
//! A request path is resolved tier by tier and the first tier with a match
//! wins:
//!
//! 1. **Static** routes, by exact segment lookup
//! 2. **Dynamic** routes with the same number of segments
//! 3. **Catch-all** and optional catch-all routes
//!
//! Inside a tier, the route whose segments are more specific from left to
//! right wins (`static > dynamic > catch-all > optional catch-all`). Two
//! routes with the same shape are rejected when the table is built.
//!
//! ## Parameters
//!
//! Dynamic segments capture one [`ParamValue::Single`], catch-alls capture a
//! [`ParamValue::List`]. An optional catch-all that matches nothing leaves
//! its key out. When merged with a query string, route parameters always
//! override query parameters of the same name.
//!
//! ## Example
//!
//! ```
//! use blitz_router::{ParamValue, RouteTable};
//!
//! let table = RouteTable::from_files([
//!     "pages/post/create.tsx",
//!     "pages/post/[pid].tsx",
//!     "pages/post/[...slug].tsx",
//! ])
//! .unwrap();
//!
//! let m = table.resolve_url("/post/abc?pid=123").unwrap();
//! assert_eq!(m.route.to_string(), "/post/[pid]");
//! assert_eq!(m.params.get_str("pid"), Some("abc"));
//!
//! let m = table.resolve("/post/a/b").unwrap();
//! assert_eq!(m.params.get("slug"), Some(&ParamValue::from(vec!["a", "b"])));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod params;
pub mod path;
mod query;
pub mod route;
mod table;

pub use error::{ConfigError, PatternError};
pub use params::{merge_params, ParamValue, Params};
pub use path::{is_valid_path, normalize_path};
pub use query::parse_query;
pub use route::{RouteKind, RoutePattern, Segment, Tier};
pub use table::{MatchResult, RouteTable, RouteTableBuilder};

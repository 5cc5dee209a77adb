//! # Rusty Routes
//!
//! A declarative route-table generator: describe a CRUD-style resource
//! tersely ("this resource supports create, update, remove, list, show")
//! and get back a concrete table of (path, method, name, handler) route
//! descriptors ready for registration with any HTTP router.
//!
//! - **Human-friendly paths**: `things/new`, `things/:id/edit`,
//!   `things/:id/remove` — GET renders the form, POST on the same path
//!   mutates.
//! - **Two verbs only**: every route is GET or POST.
//! - **Resource vs collection mode**: identifiers whose singular and plural
//!   forms are equal (`profile`, `login`) drop the `:id` placeholder and the
//!   `list` action.
//! - **Layered overrides**: context options (`name`, `prefix`, `param`,
//!   `format`, ...) merged with per-call arguments (`path`, `name`, `bare`),
//!   later layers winning, no hidden mutation.
//! - **Pluggable naming**: singularization and dasherizing live behind the
//!   [`Inflector`] trait; an English default is built in.
//!
//! The generator never parses or matches requests and never dispatches
//! handlers — it only emits descriptors an external router consumes.
//!
//! ## Example
//!
//! ```
//! use rusty_routes::{declare_routes, ContextOptions, RouteArgs, RouteTable};
//!
//! let mut table = RouteTable::new();
//!
//! declare_routes(&mut table, "posts", ContextOptions::default(), |ctx| {
//!     ctx.all()
//! })
//! .unwrap();
//!
//! declare_routes(
//!     &mut table,
//!     "comments",
//!     ContextOptions::new().prefix("posts/:post_id"),
//!     |ctx| {
//!         ctx.create(RouteArgs::new())?;
//!         ctx.show(RouteArgs::new())?;
//!         Ok(())
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(table.find("new_post").unwrap().path, "posts/new");
//! assert_eq!(table.find("comment").unwrap().path, "posts/:post_id/comments/:id");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod builder;
mod context;
mod descriptor;
mod error;
mod inflect;
mod options;

// ============================================================================
// Public API
// ============================================================================

pub use builder::{declare_routes, declare_routes_with, RegistrationConflict, RouteTable, Router};
pub use context::ResourceContext;
pub use descriptor::{DescriptorOptions, HandlerRef, Method, RouteDescriptor};
pub use error::RouteError;
pub use inflect::{EnglishInflector, Inflector};
pub use options::{ContextOptions, RouteArgs};

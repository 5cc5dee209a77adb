// File: src/descriptor.rs
// Purpose: The declarative route descriptor emitted for external registration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// HTTP method carried by a descriptor.
///
/// The generator deliberately restricts itself to GET (rendering) and POST
/// (mutating); everything a CRUD form flow needs fits in those two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Reference to the request-handling unit for a route.
///
/// The pair is opaque to this crate: resolving it into an invocable handler
/// is the consuming router's/framework's job. The `action` string is passed
/// through unmodified so the router can report unknown actions meaningfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRef {
    /// Resource identifier as originally declared (e.g. `"admin/reports"`).
    pub identifier: String,
    /// Action within the handler group (e.g. `"new"`, `"destroy"`).
    pub action: String,
}

impl HandlerRef {
    pub fn new(identifier: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            action: action.into(),
        }
    }
}

/// Resolved per-route options forwarded to the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorOptions {
    /// Whether the router should accept an optional format/extension suffix
    /// (e.g. `.json`) on the path.
    pub format: bool,

    /// Placeholder name used for item-level segments (default `"id"`).
    pub param: String,

    /// Arbitrary pass-through options, in stable order.
    pub extra: BTreeMap<String, String>,
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        Self {
            format: false,
            param: "id".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// One declarative route, ready for registration with an external router.
///
/// Descriptors are pure data; nothing here matches incoming requests. The
/// `name` is used for reverse URL generation — an empty name marks a route
/// that is only reachable via its named sibling (the POST half of a
/// create/update/remove pair shares the sibling's path and must not claim a
/// second name).
///
/// # Examples
///
/// ```
/// use rusty_routes::{ContextOptions, ResourceContext, RouteArgs, Method};
///
/// let mut ctx = ResourceContext::new("things", ContextOptions::default()).unwrap();
/// ctx.create(RouteArgs::new()).unwrap();
///
/// let routes = ctx.routes();
/// assert_eq!(routes[0].path, "things/new");
/// assert_eq!(routes[0].method, Method::Get);
/// assert_eq!(routes[0].name, "new_thing");
/// assert_eq!(routes[1].method, Method::Post);
/// assert_eq!(routes[1].name, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Path pattern, possibly containing `:param` placeholders and
    /// router-specific optional groups (e.g. `signup(/:step)`).
    pub path: String,
    pub method: Method,
    /// Route name for reverse URL generation; empty means unnamed.
    pub name: String,
    pub handler: HandlerRef,
    pub options: DescriptorOptions,
}

impl RouteDescriptor {
    /// Whether this descriptor carries a usable route name.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

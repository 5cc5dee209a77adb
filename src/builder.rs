// File: src/builder.rs
// Purpose: DSL entry point and the router registration boundary

use thiserror::Error;
use tracing::debug;

use crate::context::ResourceContext;
use crate::descriptor::{Method, RouteDescriptor};
use crate::error::RouteError;
use crate::inflect::{EnglishInflector, Inflector};
use crate::options::ContextOptions;

/// Registration boundary for the external router.
///
/// Implementations are expected to fail when two descriptors register
/// conflicting non-empty names or structurally ambiguous paths; such
/// failures are propagated to the caller as
/// [`RouteError::Rejected`](crate::RouteError::Rejected), never swallowed.
pub trait Router {
    fn register(
        &mut self,
        route: RouteDescriptor,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Conflicts detected by [`RouteTable`] at registration time.
#[derive(Debug, Error)]
pub enum RegistrationConflict {
    #[error("route name `{0}` is already registered")]
    Name(String),

    #[error("{method} {path} is already registered")]
    Path { method: Method, path: String },
}

/// Order-preserving batch collector implementing [`Router`].
///
/// Useful in tests and for callers who want the generated table itself
/// instead of immediate registration. Enforces non-empty-name uniqueness and
/// (path, method) uniqueness across every context registered into it.
///
/// # Examples
///
/// ```
/// use rusty_routes::{declare_routes, ContextOptions, RouteArgs, RouteTable};
///
/// let mut table = RouteTable::new();
/// declare_routes(&mut table, "things", ContextOptions::default(), |ctx| {
///     ctx.all()
/// })
/// .unwrap();
///
/// assert_eq!(table.find("edit_thing").unwrap().path, "things/:id/edit");
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered descriptors, in registration order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Looks up a descriptor by its non-empty route name.
    pub fn find(&self, name: &str) -> Option<&RouteDescriptor> {
        if name.is_empty() {
            return None;
        }
        self.routes.iter().find(|route| route.name == name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn into_routes(self) -> Vec<RouteDescriptor> {
        self.routes
    }
}

impl Router for RouteTable {
    fn register(
        &mut self,
        route: RouteDescriptor,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if route.is_named() && self.routes.iter().any(|r| r.name == route.name) {
            return Err(Box::new(RegistrationConflict::Name(route.name)));
        }
        if self
            .routes
            .iter()
            .any(|r| r.path == route.path && r.method == route.method)
        {
            return Err(Box::new(RegistrationConflict::Path {
                method: route.method,
                path: route.path,
            }));
        }

        self.routes.push(route);
        Ok(())
    }
}

/// Declares routes for one resource and forwards them to `router`.
///
/// Instantiates a fresh [`ResourceContext`] (backed by the default
/// [`EnglishInflector`]), runs the declaration closure against it, then
/// registers the accumulated descriptors one at a time in the order they
/// were produced. The context lives only for the duration of this call.
///
/// # Examples
///
/// ```
/// use rusty_routes::{declare_routes, ContextOptions, RouteArgs, RouteTable};
///
/// let mut table = RouteTable::new();
/// declare_routes(&mut table, "things", ContextOptions::default(), |ctx| {
///     ctx.create(RouteArgs::new())?;
///     ctx.show(RouteArgs::new())?;
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(table.find("new_thing").unwrap().path, "things/new");
/// assert_eq!(table.find("thing").unwrap().path, "things/:id");
/// ```
pub fn declare_routes<R, F>(
    router: &mut R,
    identifier: impl Into<String>,
    options: ContextOptions,
    declare: F,
) -> Result<(), RouteError>
where
    R: Router + ?Sized,
    F: FnOnce(&mut ResourceContext) -> Result<(), RouteError>,
{
    declare_routes_with(router, EnglishInflector, identifier, options, declare)
}

/// [`declare_routes`] with a caller-supplied naming service.
pub fn declare_routes_with<R, I, F>(
    router: &mut R,
    inflector: I,
    identifier: impl Into<String>,
    options: ContextOptions,
    declare: F,
) -> Result<(), RouteError>
where
    R: Router + ?Sized,
    I: Inflector + 'static,
    F: FnOnce(&mut ResourceContext) -> Result<(), RouteError>,
{
    let mut context = ResourceContext::with_inflector(Box::new(inflector), identifier, options)?;
    declare(&mut context)?;

    for route in context.into_routes() {
        debug!(
            path = %route.path,
            method = %route.method,
            name = %route.name,
            "registering route"
        );
        let path = route.path.clone();
        router
            .register(route)
            .map_err(|source| RouteError::Rejected { path, source })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RouteArgs;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_preserves_declaration_order() {
        let mut table = RouteTable::new();
        declare_routes(&mut table, "things", ContextOptions::default(), |ctx| {
            ctx.all()
        })
        .unwrap();

        let actions: Vec<&str> = table
            .routes()
            .iter()
            .map(|route| route.handler.action.as_str())
            .collect();
        assert_eq!(
            actions,
            ["new", "create", "edit", "update", "remove", "destroy", "show", "index"]
        );
    }

    #[test]
    fn test_table_rejects_conflicting_names_across_contexts() {
        let mut table = RouteTable::new();
        declare_routes(&mut table, "things", ContextOptions::default(), |ctx| {
            ctx.show(RouteArgs::new())
        })
        .unwrap();

        let err = declare_routes(
            &mut table,
            "gadgets",
            ContextOptions::default(),
            |ctx| ctx.show(RouteArgs::new().name("thing")),
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::Rejected { .. }));
    }

    #[test]
    fn test_table_rejects_ambiguous_paths() {
        let mut table = RouteTable::new();
        declare_routes(&mut table, "things", ContextOptions::default(), |ctx| {
            ctx.list(RouteArgs::new())
        })
        .unwrap();

        let err = declare_routes(
            &mut table,
            "gadgets",
            ContextOptions::new().path_name("things"),
            |ctx| ctx.list(RouteArgs::new()),
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::Rejected { .. }));
    }

    #[test]
    fn test_find_never_matches_unnamed_routes() {
        let mut table = RouteTable::new();
        declare_routes(&mut table, "things", ContextOptions::default(), |ctx| {
            ctx.create(RouteArgs::new())
        })
        .unwrap();

        assert!(table.find("").is_none());
        assert_eq!(table.len(), 2);
    }
}

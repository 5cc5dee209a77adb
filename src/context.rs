// File: src/context.rs
// Purpose: Per-resource route accumulation and the path/name derivation rules

use std::collections::BTreeMap;

use tracing::debug;

use crate::descriptor::{DescriptorOptions, HandlerRef, Method, RouteDescriptor};
use crate::error::RouteError;
use crate::inflect::{EnglishInflector, Inflector};
use crate::options::{ContextOptions, RouteArgs};

/// Action-specific path segment rule.
enum Segment {
    New,
    Edit,
    Remove,
    List,
    Show,
    Action(String),
}

/// Accumulates route descriptors for one declared resource.
///
/// A context is created per declaration block, lives only for its duration,
/// and is discarded once its descriptors are forwarded. Singular/plural forms
/// are computed through the [`Inflector`] once, at construction.
///
/// Every action method follows the same three-step contract: merge the
/// layered options (defaults < context < call), resolve the path (explicit
/// path verbatim after dasherizing, otherwise synthesized from identifier,
/// mode and prefix), resolve the name (explicit `name` override wins, empty
/// string meaning "unnamed"), then append one or two descriptors in
/// GET-then-POST order.
///
/// # Examples
///
/// ```
/// use rusty_routes::{ContextOptions, ResourceContext, RouteArgs};
///
/// let mut ctx = ResourceContext::new("things", ContextOptions::default()).unwrap();
/// ctx.update(RouteArgs::new()).unwrap();
///
/// assert_eq!(ctx.routes()[0].path, "things/:id/edit");
/// assert_eq!(ctx.routes()[0].name, "edit_thing");
/// ```
pub struct ResourceContext {
    /// Original identifier, kept for handler resolution.
    identifier: String,
    /// Base used for route names (the `name` override, else the identifier).
    naming_base: String,
    /// Base used for paths (`path_name`, else `name`, else the identifier).
    path_base: String,
    /// Cached singular form of the naming base.
    singular: String,
    prefix: Option<String>,
    default_param: String,
    default_format: bool,
    default_extra: BTreeMap<String, String>,
    forced_resource: bool,
    inflector: Box<dyn Inflector>,
    routes: Vec<RouteDescriptor>,
}

impl std::fmt::Debug for ResourceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceContext")
            .field("identifier", &self.identifier)
            .field("naming_base", &self.naming_base)
            .field("path_base", &self.path_base)
            .field("singular", &self.singular)
            .field("prefix", &self.prefix)
            .field("default_param", &self.default_param)
            .field("default_format", &self.default_format)
            .field("default_extra", &self.default_extra)
            .field("forced_resource", &self.forced_resource)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl ResourceContext {
    /// Creates a context backed by the default [`EnglishInflector`].
    pub fn new(
        identifier: impl Into<String>,
        options: ContextOptions,
    ) -> Result<Self, RouteError> {
        Self::with_inflector(Box::new(EnglishInflector), identifier, options)
    }

    /// Creates a context backed by a caller-supplied naming service.
    pub fn with_inflector(
        inflector: Box<dyn Inflector>,
        identifier: impl Into<String>,
        options: ContextOptions,
    ) -> Result<Self, RouteError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(RouteError::InvalidOption {
                option: "identifier",
                reason: "must not be empty".to_string(),
            });
        }
        options.validate()?;

        let naming_base = options.name.clone().unwrap_or_else(|| identifier.clone());
        let path_base = options
            .path_name
            .or(options.name)
            .unwrap_or_else(|| identifier.clone());
        let singular = if options.singularize == Some(false) {
            naming_base.clone()
        } else {
            inflector.singularize(&naming_base)
        };

        Ok(Self {
            identifier,
            naming_base,
            path_base,
            singular,
            prefix: options.prefix,
            default_param: options.param.unwrap_or_else(|| "id".to_string()),
            default_format: options.format.unwrap_or(false),
            default_extra: options.extra,
            forced_resource: options.resource.unwrap_or(false),
            inflector,
            routes: Vec::new(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Cached singular form of the naming base.
    pub fn singular(&self) -> &str {
        &self.singular
    }

    /// Whether this context synthesizes resource-mode paths (no collection
    /// placeholder, no `list` in [`all`](Self::all)).
    ///
    /// True when the singular form equals the plural one — irregular or
    /// already-singular identifiers — or when forced via the `resource` /
    /// `singularize: false` options.
    pub fn is_resource(&self) -> bool {
        self.forced_resource || self.naming_base == self.singular
    }

    /// Descriptors produced so far, in emission order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<RouteDescriptor> {
        self.routes
    }

    /// GET `new` (named `new_{singular}`) plus POST `create` (unnamed) on
    /// the same path.
    pub fn create(&mut self, args: RouteArgs) -> Result<(), RouteError> {
        let default_name = format!("new_{}", self.singular);
        let resolved = self.resolve(Segment::New, &default_name, &args)?;
        self.push_pair(resolved, "new", "create")
    }

    /// GET `edit` (named `edit_{singular}`) plus POST `update` (unnamed).
    pub fn update(&mut self, args: RouteArgs) -> Result<(), RouteError> {
        let default_name = format!("edit_{}", self.singular);
        let resolved = self.resolve(Segment::Edit, &default_name, &args)?;
        self.push_pair(resolved, "edit", "update")
    }

    /// GET `remove` (named `remove_{singular}`) plus POST `destroy`
    /// (unnamed).
    pub fn remove(&mut self, args: RouteArgs) -> Result<(), RouteError> {
        let default_name = format!("remove_{}", self.singular);
        let resolved = self.resolve(Segment::Remove, &default_name, &args)?;
        self.push_pair(resolved, "remove", "destroy")
    }

    /// GET `index` over the collection path, named after the plural
    /// identifier.
    pub fn list(&mut self, args: RouteArgs) -> Result<(), RouteError> {
        let default_name = self.naming_base.clone();
        let resolved = self.resolve(Segment::List, &default_name, &args)?;
        let descriptor = self.descriptor(resolved.path, Method::Get, resolved.name, "index", resolved.options);
        self.push(descriptor)
    }

    /// GET `show` over the item path, named after the singular identifier.
    pub fn show(&mut self, args: RouteArgs) -> Result<(), RouteError> {
        let default_name = self.singular.clone();
        let resolved = self.resolve(Segment::Show, &default_name, &args)?;
        let descriptor = self.descriptor(resolved.path, Method::Get, resolved.name, "show", resolved.options);
        self.push(descriptor)
    }

    /// Escape hatch: GET route for an arbitrary action under the resource
    /// path. The action string is passed to the handler ref unmodified.
    pub fn get(&mut self, action: impl Into<String>, args: RouteArgs) -> Result<(), RouteError> {
        let action = action.into();
        let resolved = self.resolve(Segment::Action(action.clone()), &action, &args)?;
        let descriptor = self.descriptor(resolved.path, Method::Get, resolved.name, &action, resolved.options);
        self.push(descriptor)
    }

    /// Escape hatch: POST route for an arbitrary action. When a sibling
    /// route already claimed the same path with a non-empty name, the
    /// default name is dropped so the pair shares one reverse-URL entry.
    pub fn post(&mut self, action: impl Into<String>, args: RouteArgs) -> Result<(), RouteError> {
        let action = action.into();
        let mut resolved = self.resolve(Segment::Action(action.clone()), &action, &args)?;
        if !resolved.name_overridden
            && self
                .routes
                .iter()
                .any(|route| route.path == resolved.path && route.is_named())
        {
            resolved.name = String::new();
        }
        let descriptor = self.descriptor(resolved.path, Method::Post, resolved.name, &action, resolved.options);
        self.push(descriptor)
    }

    /// Declares the five standard actions; `list` is skipped in resource
    /// mode.
    pub fn all(&mut self) -> Result<(), RouteError> {
        self.create(RouteArgs::new())?;
        self.update(RouteArgs::new())?;
        self.remove(RouteArgs::new())?;
        self.show(RouteArgs::new())?;
        if !self.is_resource() {
            self.list(RouteArgs::new())?;
        }
        Ok(())
    }

    /// Resolves the layered options, path, and name for one action call.
    fn resolve(
        &self,
        segment: Segment,
        default_name: &str,
        args: &RouteArgs,
    ) -> Result<Resolved, RouteError> {
        args.validate()?;

        let param = args
            .param
            .clone()
            .unwrap_or_else(|| self.default_param.clone());

        let mut extra = self.default_extra.clone();
        extra.extend(args.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        let options = DescriptorOptions {
            format: args.format.unwrap_or(self.default_format),
            param: param.clone(),
            extra,
        };

        let path = match &args.path {
            Some(path) => self.inflector.dasherize(path),
            None => self.synthesize(&segment, &param, args.bare),
        };

        let (name, name_overridden) = match &args.name {
            Some(name) => (name.clone(), true),
            None => (underscore(default_name), false),
        };

        Ok(Resolved {
            path,
            name,
            name_overridden,
            options,
        })
    }

    /// Synthesizes a path from prefix, path base, mode, and segment rule.
    fn synthesize(&self, segment: &Segment, param: &str, bare: bool) -> String {
        let mut segments: Vec<String> = Vec::new();
        if let Some(prefix) = &self.prefix {
            segments.push(prefix.clone());
        }
        segments.push(self.path_base.clone());

        if self.is_resource() {
            match segment {
                Segment::List | Segment::Show => {}
                Segment::New if !bare => segments.push("new".to_string()),
                Segment::Edit if !bare => segments.push("edit".to_string()),
                Segment::Remove if !bare => segments.push("remove".to_string()),
                Segment::Action(action) if !bare => segments.push(action.clone()),
                _ => {}
            }
        } else {
            match segment {
                Segment::List => {}
                Segment::New => {
                    if !bare {
                        segments.push("new".to_string());
                    }
                }
                Segment::Show => segments.push(format!(":{param}")),
                Segment::Edit => {
                    segments.push(format!(":{param}"));
                    if !bare {
                        segments.push("edit".to_string());
                    }
                }
                Segment::Remove => {
                    segments.push(format!(":{param}"));
                    if !bare {
                        segments.push("remove".to_string());
                    }
                }
                Segment::Action(action) => {
                    if !bare {
                        segments.push(action.clone());
                    }
                }
            }
        }

        self.inflector.dasherize(&segments.join("/"))
    }

    fn descriptor(
        &self,
        path: String,
        method: Method,
        name: String,
        action: &str,
        options: DescriptorOptions,
    ) -> RouteDescriptor {
        RouteDescriptor {
            path,
            method,
            name,
            handler: HandlerRef::new(self.identifier.clone(), action),
            options,
        }
    }

    /// Emits the GET/POST pair for a create/update/remove action: the GET
    /// half carries the resolved name, the POST half shares the path
    /// unnamed.
    fn push_pair(
        &mut self,
        resolved: Resolved,
        get_action: &str,
        post_action: &str,
    ) -> Result<(), RouteError> {
        let get = self.descriptor(
            resolved.path.clone(),
            Method::Get,
            resolved.name,
            get_action,
            resolved.options.clone(),
        );
        self.push(get)?;

        let post = self.descriptor(
            resolved.path,
            Method::Post,
            String::new(),
            post_action,
            resolved.options,
        );
        self.push(post)
    }

    /// Appends one descriptor, rejecting non-empty name collisions within
    /// this context.
    fn push(&mut self, descriptor: RouteDescriptor) -> Result<(), RouteError> {
        if descriptor.is_named() && self.routes.iter().any(|route| route.name == descriptor.name) {
            return Err(RouteError::DuplicateName {
                name: descriptor.name,
                identifier: self.identifier.clone(),
            });
        }

        debug!(
            path = %descriptor.path,
            method = %descriptor.method,
            name = %descriptor.name,
            action = %descriptor.handler.action,
            "route descriptor emitted"
        );
        self.routes.push(descriptor);
        Ok(())
    }
}

/// Result of the per-call resolution step.
struct Resolved {
    path: String,
    name: String,
    name_overridden: bool,
    options: DescriptorOptions,
}

/// Folds a name template into route-name form: lowercase, `/` → `_`.
fn underscore(name: &str) -> String {
    name.to_ascii_lowercase().replace('/', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn context(identifier: &str) -> ResourceContext {
        ResourceContext::new(identifier, ContextOptions::default()).unwrap()
    }

    #[rstest]
    #[case::create("create", "things/new", "new_thing")]
    #[case::update("update", "things/:id/edit", "edit_thing")]
    #[case::remove("remove", "things/:id/remove", "remove_thing")]
    #[case::show("show", "things/:id", "thing")]
    #[case::list("list", "things", "things")]
    fn test_collection_paths_and_names(
        #[case] action: &str,
        #[case] path: &str,
        #[case] name: &str,
    ) {
        let mut ctx = context("things");
        match action {
            "create" => ctx.create(RouteArgs::new()).unwrap(),
            "update" => ctx.update(RouteArgs::new()).unwrap(),
            "remove" => ctx.remove(RouteArgs::new()).unwrap(),
            "show" => ctx.show(RouteArgs::new()).unwrap(),
            "list" => ctx.list(RouteArgs::new()).unwrap(),
            other => panic!("unknown action {other}"),
        }

        assert_eq!(ctx.routes()[0].path, path);
        assert_eq!(ctx.routes()[0].name, name);
    }

    #[rstest]
    #[case::create("create", "profile/new")]
    #[case::update("update", "profile/edit")]
    #[case::remove("remove", "profile/remove")]
    #[case::show("show", "profile")]
    fn test_resource_paths(#[case] action: &str, #[case] path: &str) {
        let mut ctx = context("profile");
        assert!(ctx.is_resource());
        match action {
            "create" => ctx.create(RouteArgs::new()).unwrap(),
            "update" => ctx.update(RouteArgs::new()).unwrap(),
            "remove" => ctx.remove(RouteArgs::new()).unwrap(),
            "show" => ctx.show(RouteArgs::new()).unwrap(),
            other => panic!("unknown action {other}"),
        }

        assert_eq!(ctx.routes()[0].path, path);
    }

    #[test]
    fn test_create_emits_get_then_post_sharing_path() {
        let mut ctx = context("things");
        ctx.create(RouteArgs::new()).unwrap();

        let routes = ctx.routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method, Method::Get);
        assert_eq!(routes[1].method, Method::Post);
        assert_eq!(routes[0].path, routes[1].path);
        assert!(routes[0].is_named());
        assert!(!routes[1].is_named());
        assert_eq!(routes[0].handler.action, "new");
        assert_eq!(routes[1].handler.action, "create");
    }

    #[test]
    fn test_remove_post_half_targets_destroy() {
        let mut ctx = context("things");
        ctx.remove(RouteArgs::new()).unwrap();
        assert_eq!(ctx.routes()[1].handler.action, "destroy");
    }

    #[test]
    fn test_synthesized_paths_are_dasherized() {
        let mut ctx = context("crazy_things");
        ctx.create(RouteArgs::new()).unwrap();
        assert_eq!(ctx.routes()[0].path, "crazy-things/new");
        assert_eq!(ctx.routes()[0].name, "new_crazy_thing");
    }

    #[test]
    fn test_explicit_path_is_used_verbatim_after_dasherizing() {
        let mut ctx = context("signup");
        ctx.create(RouteArgs::new().path("sign_up(/:step)")).unwrap();
        assert_eq!(ctx.routes()[0].path, "sign-up(/:step)");
        assert_eq!(ctx.routes()[1].path, "sign-up(/:step)");
    }

    #[test]
    fn test_explicit_path_ignores_prefix() {
        let mut ctx = ResourceContext::new(
            "comments",
            ContextOptions::new().prefix("posts/:post_id"),
        )
        .unwrap();
        ctx.show(RouteArgs::new().path("latest")).unwrap();
        assert_eq!(ctx.routes()[0].path, "latest");
    }

    #[test]
    fn test_name_override_and_explicit_unnamed() {
        let mut ctx = context("login");
        ctx.create(RouteArgs::new().name("auth")).unwrap();
        assert_eq!(ctx.routes()[0].name, "auth");

        let mut ctx = context("login");
        ctx.create(RouteArgs::new().unnamed()).unwrap();
        assert_eq!(ctx.routes()[0].name, "");
    }

    #[test]
    fn test_bare_suppresses_trailing_segment() {
        let mut ctx = context("login");
        ctx.create(RouteArgs::new().bare()).unwrap();
        assert_eq!(ctx.routes()[0].path, "login");

        let mut ctx = context("things");
        ctx.update(RouteArgs::new().bare()).unwrap();
        assert_eq!(ctx.routes()[0].path, "things/:id");
    }

    #[test]
    fn test_namespaced_identifier_names() {
        let mut ctx = context("admin/reports");
        ctx.all().unwrap();

        let names: Vec<&str> = ctx
            .routes()
            .iter()
            .filter(|r| r.is_named())
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "new_admin_report",
                "edit_admin_report",
                "remove_admin_report",
                "admin_report",
                "admin_reports",
            ]
        );
        assert_eq!(ctx.routes()[0].path, "admin/reports/new");
        assert_eq!(ctx.routes()[0].handler.identifier, "admin/reports");
    }

    #[test]
    fn test_all_skips_list_in_resource_mode() {
        let mut ctx = context("profile");
        ctx.all().unwrap();
        assert!(ctx
            .routes()
            .iter()
            .all(|route| route.handler.action != "index"));
        assert_eq!(ctx.routes().len(), 7);
    }

    #[test]
    fn test_all_emits_list_in_collection_mode() {
        let mut ctx = context("things");
        ctx.all().unwrap();
        assert_eq!(ctx.routes().len(), 8);
        assert_eq!(ctx.routes()[7].handler.action, "index");
    }

    #[test]
    fn test_param_override_changes_placeholder() {
        let mut ctx =
            ResourceContext::new("things", ContextOptions::new().param("slug")).unwrap();
        ctx.show(RouteArgs::new()).unwrap();
        assert_eq!(ctx.routes()[0].path, "things/:slug");
        assert_eq!(ctx.routes()[0].options.param, "slug");
    }

    #[test]
    fn test_call_options_override_context_options() {
        let mut ctx =
            ResourceContext::new("things", ContextOptions::new().format(true)).unwrap();
        ctx.show(RouteArgs::new()).unwrap();
        ctx.list(RouteArgs::new().format(false)).unwrap();
        assert!(ctx.routes()[0].options.format);
        assert!(!ctx.routes()[1].options.format);
    }

    #[test]
    fn test_extra_options_pass_through_merged() {
        let mut ctx = ResourceContext::new(
            "things",
            ContextOptions::new().option("scope", "admin"),
        )
        .unwrap();
        ctx.show(RouteArgs::new().option("cache", "off")).unwrap();

        let extra = &ctx.routes()[0].options.extra;
        assert_eq!(extra.get("scope").map(String::as_str), Some("admin"));
        assert_eq!(extra.get("cache").map(String::as_str), Some("off"));
    }

    #[test]
    fn test_duplicate_name_fails_fast() {
        let mut ctx = context("things");
        ctx.show(RouteArgs::new()).unwrap();
        let err = ctx.show(RouteArgs::new()).unwrap_err();
        assert!(matches!(err, RouteError::DuplicateName { .. }));
    }

    #[test]
    fn test_post_name_deduped_against_prior_get() {
        let mut ctx = context("login");
        ctx.get("check_inbox", RouteArgs::new()).unwrap();
        ctx.post("check_inbox", RouteArgs::new()).unwrap();

        let routes = ctx.routes();
        assert_eq!(routes[0].path, "login/check-inbox");
        assert_eq!(routes[0].name, "check_inbox");
        assert_eq!(routes[1].path, "login/check-inbox");
        assert_eq!(routes[1].name, "");
        assert_eq!(routes[1].handler.action, "check_inbox");
    }

    #[test]
    fn test_post_without_prior_get_keeps_name() {
        let mut ctx = context("login");
        ctx.post("check_inbox", RouteArgs::new()).unwrap();
        assert_eq!(ctx.routes()[0].name, "check_inbox");
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let err = ResourceContext::new("  ", ContextOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RouteError::InvalidOption { option: "identifier", .. }
        ));
    }

    #[test]
    fn test_singularize_false_pins_names_and_forces_resource_mode() {
        let mut ctx = ResourceContext::new(
            "blog_settings",
            ContextOptions::new()
                .prefix("blogs/:blog_id")
                .path_name("settings")
                .resource(true)
                .singularize(false),
        )
        .unwrap();
        ctx.show(RouteArgs::new()).unwrap();
        ctx.update(RouteArgs::new()).unwrap();

        let routes = ctx.routes();
        assert_eq!(routes[0].path, "blogs/:blog_id/settings");
        assert_eq!(routes[0].name, "blog_settings");
        assert_eq!(routes[1].path, "blogs/:blog_id/settings/edit");
        assert_eq!(routes[1].name, "edit_blog_settings");
    }
}

// File: src/options.rs
// Purpose: Typed, layered route configuration (context defaults + per-call args)

use std::collections::BTreeMap;

use crate::error::RouteError;

/// Context-level configuration for one declared resource.
///
/// Every field is optional; unset fields fall back to documented defaults.
/// Options layer in a fixed precedence evaluated once per action call:
/// built-in defaults < context options < per-call [`RouteArgs`]. Caller data
/// is never mutated during the merge.
///
/// # Examples
///
/// ```
/// use rusty_routes::ContextOptions;
///
/// let options = ContextOptions::new()
///     .prefix("posts/:post_id")
///     .format(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Identifier override used for naming and pathing; the originally
    /// declared identifier is kept for handler resolution.
    pub name: Option<String>,

    /// Pathing-only override. Takes precedence over `name` for path
    /// synthesis and leaves route names untouched.
    pub path_name: Option<String>,

    /// Prepended to every synthesized path, e.g. `"posts/:post_id"` to nest
    /// under a parent resource. Explicit per-call paths are not prefixed.
    pub prefix: Option<String>,

    /// Placeholder name for item-level segments (default `"id"`).
    pub param: Option<String>,

    /// Whether paths accept an optional format/extension suffix
    /// (default `false`).
    pub format: Option<bool>,

    /// Force resource-mode path synthesis regardless of the computed
    /// singular/plural comparison.
    pub resource: Option<bool>,

    /// Set to `false` to pin the singular form to the identifier itself
    /// (which also puts the context in resource mode).
    pub singularize: Option<bool>,

    /// Arbitrary pass-through options copied onto every descriptor.
    pub extra: BTreeMap<String, String>,
}

impl ContextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path_name(mut self, path_name: impl Into<String>) -> Self {
        self.path_name = Some(path_name.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn format(mut self, format: bool) -> Self {
        self.format = Some(format);
        self
    }

    pub fn resource(mut self, resource: bool) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn singularize(mut self, singularize: bool) -> Self {
        self.singularize = Some(singularize);
        self
    }

    /// Adds one pass-through option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Fails fast on overrides that would otherwise be silently coerced.
    pub(crate) fn validate(&self) -> Result<(), RouteError> {
        for (option, value) in [
            ("name", &self.name),
            ("path_name", &self.path_name),
            ("prefix", &self.prefix),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(RouteError::InvalidOption {
                        option,
                        reason: "must not be empty".to_string(),
                    });
                }
            }
        }

        if let Some(param) = &self.param {
            validate_param("param", param)?;
        }

        Ok(())
    }
}

/// Per-call arguments for one action method.
///
/// `RouteArgs::new()` means "all defaults". The `name` override distinguishes
/// `None` (use the action's default name) from `Some("")` (explicitly
/// unnamed), mirroring the descriptor's empty-name convention.
///
/// # Examples
///
/// ```
/// use rusty_routes::RouteArgs;
///
/// let args = RouteArgs::new().path("signup(/:step)").name("auth");
/// let bare = RouteArgs::new().bare();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteArgs {
    /// Positional path override, used verbatim (after dasherizing) instead
    /// of the synthesized path. Not prefixed.
    pub path: Option<String>,

    /// Route-name override. `Some("")` suppresses the default name entirely.
    pub name: Option<String>,

    /// Suppress the action's conventional trailing path segment
    /// (`new`, `edit`, `remove`, or a generic action's segment).
    pub bare: bool,

    /// Placeholder-name override for this call.
    pub param: Option<String>,

    /// Format-suffix toggle override for this call.
    pub format: Option<bool>,

    /// Arbitrary pass-through options; merged over the context's.
    pub extra: BTreeMap<String, String>,
}

impl RouteArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Shorthand for `name("")`: emit the route without a name.
    pub fn unnamed(self) -> Self {
        self.name("")
    }

    pub fn bare(mut self) -> Self {
        self.bare = true;
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn format(mut self, format: bool) -> Self {
        self.format = Some(format);
        self
    }

    /// Adds one pass-through option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), RouteError> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(RouteError::InvalidOption {
                    option: "path",
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if let Some(param) = &self.param {
            validate_param("param", param)?;
        }

        Ok(())
    }
}

/// A placeholder name must be a bare identifier; `:id` or `post id` would
/// produce a path the router cannot parse.
fn validate_param(option: &'static str, param: &str) -> Result<(), RouteError> {
    let mut chars = param.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(RouteError::InvalidOption {
            option,
            reason: format!("must be a bare identifier, got `{param}`"),
        })
    }
}

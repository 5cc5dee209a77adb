// File: src/error.rs
// Purpose: Error types for route declaration and registration

use thiserror::Error;

/// Errors raised while declaring or registering routes.
///
/// All variants are synchronous and local to the declaration call that caused
/// them. Declarations run once, typically during process startup, so every
/// failure here is a build/startup-time error rather than a request-time one.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Two descriptors in the same context resolved to the same non-empty
    /// route name. Raised at emission time instead of silently overwriting.
    #[error("duplicate route name `{name}` for resource `{identifier}`")]
    DuplicateName { name: String, identifier: String },

    /// A caller-supplied override was malformed (empty identifier, empty
    /// `prefix`, a `param` that is not a valid placeholder identifier, ...).
    #[error("invalid `{option}` option: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// The external router refused a descriptor. Router failures are
    /// propagated, never swallowed.
    #[error("router rejected route `{path}`")]
    Rejected {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

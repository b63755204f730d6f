// src/interceptor/role.rs
//
// Interceptor roles and the classifier that derives a class's role from its
// type references.

use std::fmt;

use crate::errors::codes::HTTP_123;
use crate::frontend::ast::{ClassDecl, Qualifier, TypeRef};

use crate::sema::SemanticQuery;

use super::Reporter;
use super::slot::Slot;

/// The four positions an interceptor service can take in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptorRole {
    RequestInterceptor,
    RequestErrorInterceptor,
    ResponseInterceptor,
    ResponseErrorInterceptor,
}

/// Form of the single handler function a role requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Resource,
    Remote,
}

impl InterceptorRole {
    pub const ALL: [InterceptorRole; 4] = [
        InterceptorRole::RequestInterceptor,
        InterceptorRole::RequestErrorInterceptor,
        InterceptorRole::ResponseInterceptor,
        InterceptorRole::ResponseErrorInterceptor,
    ];

    /// Type name the role is declared through, also used in messages
    pub fn name(self) -> &'static str {
        match self {
            InterceptorRole::RequestInterceptor => "RequestInterceptor",
            InterceptorRole::RequestErrorInterceptor => "RequestErrorInterceptor",
            InterceptorRole::ResponseInterceptor => "ResponseInterceptor",
            InterceptorRole::ResponseErrorInterceptor => "ResponseErrorInterceptor",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }

    pub fn handler_kind(self) -> HandlerKind {
        match self {
            InterceptorRole::RequestInterceptor | InterceptorRole::RequestErrorInterceptor => {
                HandlerKind::Resource
            }
            InterceptorRole::ResponseInterceptor | InterceptorRole::ResponseErrorInterceptor => {
                HandlerKind::Remote
            }
        }
    }

    /// Required name of the remote handler; `None` for resource-style roles
    pub fn remote_name(self) -> Option<&'static str> {
        match self {
            InterceptorRole::ResponseInterceptor => Some("interceptResponse"),
            InterceptorRole::ResponseErrorInterceptor => Some("interceptResponseError"),
            InterceptorRole::RequestInterceptor | InterceptorRole::RequestErrorInterceptor => None,
        }
    }

    /// Error roles receive the error as a parameter and must declare one
    pub fn requires_error_param(self) -> bool {
        match self {
            InterceptorRole::RequestErrorInterceptor | InterceptorRole::ResponseErrorInterceptor => {
                true
            }
            InterceptorRole::RequestInterceptor | InterceptorRole::ResponseInterceptor => false,
        }
    }
}

impl fmt::Display for InterceptorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of role classification for one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not a plain `service class`; never analyzed
    NotApplicable,
    /// A service class that references no interceptor type
    NotInterceptor,
    /// More than one interceptor reference; the first role is kept but
    /// member validation is skipped
    Ambiguous(InterceptorRole),
    Role(InterceptorRole),
}

/// Classify `class`, reporting HTTP_123 for every interceptor reference
/// after the first.
///
/// A reference counts when it names one of the interceptor types either
/// unprefixed or through a prefix the unit binds to the foundation module.
pub fn classify(
    class: &ClassDecl,
    query: &dyn SemanticQuery,
    reporter: &mut Reporter<'_>,
) -> Classification {
    if class.qualifiers.is_empty()
        || class.qualifiers.iter().any(|q| *q != Qualifier::Service)
    {
        return Classification::NotApplicable;
    }

    let mut role = Slot::new();
    let mut ambiguous = false;
    for type_ref in &class.type_refs {
        let Some(candidate) = role_for(type_ref, query) else {
            continue;
        };
        if role.claim(candidate).is_err() {
            reporter.report(&HTTP_123, type_ref.span, &[type_ref.text().as_str()]);
            ambiguous = true;
        }
    }

    match role.into_inner() {
        None => Classification::NotInterceptor,
        Some(role) if ambiguous => Classification::Ambiguous(role),
        Some(role) => Classification::Role(role),
    }
}

fn role_for(type_ref: &TypeRef, query: &dyn SemanticQuery) -> Option<InterceptorRole> {
    match type_ref.prefix.as_deref() {
        Some(prefix) if !query.is_foundation_prefix(prefix) => None,
        _ => InterceptorRole::from_type_name(&type_ref.name),
    }
}

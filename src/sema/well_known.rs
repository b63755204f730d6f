// src/sema/well_known.rs
//
// Types the analyzer knows without reading any module source: builtin type
// names, the lang library prefixes every unit gets for free, and the public
// types of the foundational http module.

use crate::frontend::ast::ImportDecl;
use crate::sema::symbols::ModuleSymbol;

/// The module whose interceptor, caller and response types the validators
/// recognize, e.g. `ballerina/http`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationModule {
    pub org: Option<String>,
    /// Full module name as written after the org, e.g. `http`
    pub module: String,
}

impl FoundationModule {
    /// Parse an import path such as `ballerina/http`
    pub fn parse(path: &str) -> Self {
        match path.split_once('/') {
            Some((org, module)) => Self {
                org: Some(org.to_string()),
                module: module.to_string(),
            },
            None => Self {
                org: None,
                module: path.to_string(),
            },
        }
    }

    /// Module name as resolved symbols report it: the last `.` segment
    pub fn name(&self) -> &str {
        self.module.rsplit('.').next().unwrap_or(&self.module)
    }

    /// Whether an import brings this module into scope
    pub fn is_imported_by(&self, import: &ImportDecl) -> bool {
        if import.module != self.module {
            return false;
        }
        match (&self.org, &import.org) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => true,
        }
    }

    /// Whether a resolved module is this one. Types declared in the unit
    /// never are, whatever the file is called.
    pub fn declares(&self, module: &ModuleSymbol) -> bool {
        if module.is_local() || module.name.found().map(String::as_str) != Some(self.name()) {
            return false;
        }
        match (&self.org, &module.org) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => true,
        }
    }
}

impl Default for FoundationModule {
    fn default() -> Self {
        Self::parse("ballerina/http")
    }
}

impl std::fmt::Display for FoundationModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.org {
            Some(org) => write!(f, "{}/{}", org, self.module),
            None => f.write_str(&self.module),
        }
    }
}

/// How a foundational module type participates in the interceptor contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownKind {
    Object,
    ServiceObject,
    Record,
    Error,
}

const HTTP_TYPES: &[(&str, WellKnownKind)] = &[
    // Objects handed to handlers
    ("Caller", WellKnownKind::Object),
    ("Request", WellKnownKind::Object),
    ("Response", WellKnownKind::Object),
    ("RequestContext", WellKnownKind::Object),
    ("Headers", WellKnownKind::Object),
    ("Client", WellKnownKind::Object),
    ("Listener", WellKnownKind::Object),
    ("PushPromise", WellKnownKind::Object),
    // Service types
    ("Service", WellKnownKind::ServiceObject),
    ("InterceptableService", WellKnownKind::ServiceObject),
    ("NextService", WellKnownKind::ServiceObject),
    ("Interceptor", WellKnownKind::ServiceObject),
    ("RequestInterceptor", WellKnownKind::ServiceObject),
    ("RequestErrorInterceptor", WellKnownKind::ServiceObject),
    ("ResponseInterceptor", WellKnownKind::ServiceObject),
    ("ResponseErrorInterceptor", WellKnownKind::ServiceObject),
    // Status code responses and configuration records
    ("Continue", WellKnownKind::Record),
    ("Ok", WellKnownKind::Record),
    ("Created", WellKnownKind::Record),
    ("Accepted", WellKnownKind::Record),
    ("NoContent", WellKnownKind::Record),
    ("MovedPermanently", WellKnownKind::Record),
    ("Found", WellKnownKind::Record),
    ("SeeOther", WellKnownKind::Record),
    ("TemporaryRedirect", WellKnownKind::Record),
    ("BadRequest", WellKnownKind::Record),
    ("Unauthorized", WellKnownKind::Record),
    ("Forbidden", WellKnownKind::Record),
    ("NotFound", WellKnownKind::Record),
    ("MethodNotAllowed", WellKnownKind::Record),
    ("Conflict", WellKnownKind::Record),
    ("UnsupportedMediaType", WellKnownKind::Record),
    ("InternalServerError", WellKnownKind::Record),
    ("NotImplemented", WellKnownKind::Record),
    ("BadGateway", WellKnownKind::Record),
    ("ServiceUnavailable", WellKnownKind::Record),
    ("GatewayTimeout", WellKnownKind::Record),
    ("StatusCodeResponse", WellKnownKind::Record),
    ("ListenerConfiguration", WellKnownKind::Record),
    ("ClientConfiguration", WellKnownKind::Record),
    ("HttpServiceConfig", WellKnownKind::Record),
    ("HttpResourceConfig", WellKnownKind::Record),
    // Error types
    ("Error", WellKnownKind::Error),
    ("ClientError", WellKnownKind::Error),
    ("ListenerError", WellKnownKind::Error),
    ("ClientAuthError", WellKnownKind::Error),
    ("ListenerAuthError", WellKnownKind::Error),
    ("PayloadBindingError", WellKnownKind::Error),
    ("HeaderNotFoundError", WellKnownKind::Error),
    ("InterceptorReturnError", WellKnownKind::Error),
];

/// Look up a public type of the foundational module
pub fn foundation_type(name: &str) -> Option<WellKnownKind> {
    HTTP_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, kind)| *kind)
}

const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "decimal", "string", "boolean", "byte", "json", "xml", "anydata", "any",
    "readonly", "handle", "never", "map", "table", "stream", "typedesc", "future", "function",
    "object", "record",
];

/// Builtin types whose values are plain data
const ANYDATA_TYPES: &[&str] = &[
    "int", "float", "decimal", "string", "boolean", "byte", "json", "xml", "anydata", "readonly",
    "map", "table",
];

/// `map<string>` -> `map`
fn base_name(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim()
}

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&base_name(name))
}

pub fn is_anydata_builtin(name: &str) -> bool {
    ANYDATA_TYPES.contains(&base_name(name))
}

/// Lang library modules usable through a prefix without an import
const PREDECLARED_PREFIXES: &[&str] = &[
    "array", "boolean", "decimal", "error", "float", "function", "future", "int", "map",
    "object", "stream", "string", "table", "transaction", "typedesc", "value", "xml",
];

pub fn is_predeclared_prefix(prefix: &str) -> bool {
    PREDECLARED_PREFIXES.contains(&prefix)
}

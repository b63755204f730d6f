// src/errors/codes.rs
//! Diagnostic catalog.
//!
//! Codes follow two schemes:
//! - E2xxx: upstream semantic errors found while building the semantic model
//! - HTTP_xxx: interceptor service contract violations
//!
//! Lexer (E0xxx) and parser (E1xxx) errors are miette enums in
//! `errors::lexer` and `errors::parser`.

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// Error metadata - static definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    pub hint: Option<&'static str>,
}

impl ErrorInfo {
    pub fn code_string(&self) -> String {
        self.code.to_string()
    }

    /// Substitute `{}` placeholders in order. Missing arguments leave the
    /// placeholder empty; extra arguments are ignored.
    pub fn format(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.message.len());
        let mut args = args.iter();
        let mut rest = self.message;
        while let Some(idx) = rest.find("{}") {
            out.push_str(&rest[..idx]);
            if let Some(arg) = args.next() {
                out.push_str(arg);
            }
            rest = &rest[idx + 2..];
        }
        out.push_str(rest);
        out
    }

    /// Number of `{}` placeholders in the template
    pub fn arity(&self) -> usize {
        self.message.matches("{}").count()
    }
}

/// Look up a catalog entry by its code string
pub fn lookup(code: &str) -> Option<&'static ErrorInfo> {
    CATALOG.iter().copied().find(|info| info.code == code)
}

// =============================================================================
// Semantic Errors (E2xxx)
// =============================================================================

/// E2001: Type uses a module prefix that no import declares
pub const SEMA_UNDEFINED_MODULE: ErrorInfo = ErrorInfo {
    code: "E2001",
    message: "undefined module '{}'",
    severity: Severity::Error,
    hint: Some("add an import for the module"),
};

/// E2002: Type name could not be resolved
pub const SEMA_UNKNOWN_TYPE: ErrorInfo = ErrorInfo {
    code: "E2002",
    message: "unknown type '{}'",
    severity: Severity::Error,
    hint: None,
};

/// E2003: Two methods of a class share a name
pub const SEMA_REDECLARED_MEMBER: ErrorInfo = ErrorInfo {
    code: "E2003",
    message: "redeclared symbol '{}'",
    severity: Severity::Error,
    hint: None,
};

/// E2004: Two imports bind the same prefix
pub const SEMA_DUPLICATE_PREFIX: ErrorInfo = ErrorInfo {
    code: "E2004",
    message: "redeclared import module prefix '{}'",
    severity: Severity::Error,
    hint: Some("use 'as' to give one of the imports another prefix"),
};

// =============================================================================
// Interceptor Contract Errors (HTTP_xxx)
// =============================================================================

/// HTTP_106: Resource handler parameter of an unsupported type
pub const HTTP_106: ErrorInfo = ErrorInfo {
    code: "HTTP_106",
    message: "invalid interceptor resource function parameter type: '{}'",
    severity: Severity::Error,
    hint: Some("allowed parameters are 'http:RequestContext', 'http:Caller', 'http:Request', 'http:Headers' and 'error'"),
};

/// HTTP_115: More than one caller parameter
pub const HTTP_115: ErrorInfo = ErrorInfo {
    code: "HTTP_115",
    message: "invalid multiple 'http:Caller' parameter: '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_116: More than one request parameter
pub const HTTP_116: ErrorInfo = ErrorInfo {
    code: "HTTP_116",
    message: "invalid multiple 'http:Request' parameter: '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_117: More than one headers parameter
pub const HTTP_117: ErrorInfo = ErrorInfo {
    code: "HTTP_117",
    message: "invalid multiple 'http:Headers' parameter: '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_121: More than one request context parameter
pub const HTTP_121: ErrorInfo = ErrorInfo {
    code: "HTTP_121",
    message: "invalid multiple 'http:RequestContext' parameter: '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_122: More than one error parameter
pub const HTTP_122: ErrorInfo = ErrorInfo {
    code: "HTTP_122",
    message: "invalid multiple 'error' parameter: '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_123: Class includes more than one interceptor type
pub const HTTP_123: ErrorInfo = ErrorInfo {
    code: "HTTP_123",
    message: "invalid multiple interceptor type reference: '{}'",
    severity: Severity::Error,
    hint: Some("an interceptor service class can implement only one interceptor type"),
};

/// HTTP_124: More than one resource function in a request interceptor
pub const HTTP_124: ErrorInfo = ErrorInfo {
    code: "HTTP_124",
    message: "invalid multiple interceptor resource functions",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_126: Resource handler return type outside the interceptor contract
pub const HTTP_126: ErrorInfo = ErrorInfo {
    code: "HTTP_126",
    message: "invalid interceptor resource function return type: expected 'anydata|http:Response|http:NextService|error?', but found '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_127: Resource handler path is not the rest path
pub const HTTP_127: ErrorInfo = ErrorInfo {
    code: "HTTP_127",
    message: "invalid interceptor resource path: expected default resource path: '[string... path]', but found '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_128: Resource handler accessor is not `default`
pub const HTTP_128: ErrorInfo = ErrorInfo {
    code: "HTTP_128",
    message: "invalid interceptor resource method: expected default resource method: 'default', but found '{}'",
    severity: Severity::Error,
    hint: Some("declare the handler as `resource function 'default [string... path]()`"),
};

/// HTTP_132: Request interceptor without a resource function
pub const HTTP_132: ErrorInfo = ErrorInfo {
    code: "HTTP_132",
    message: "missing resource function in '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_135: Response interceptor without its remote function
pub const HTTP_135: ErrorInfo = ErrorInfo {
    code: "HTTP_135",
    message: "missing remote function in '{}': expected remote function '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_136: Resource function in a response interceptor
pub const HTTP_136: ErrorInfo = ErrorInfo {
    code: "HTTP_136",
    message: "resource function is not allowed in '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_137: Remote function in a request interceptor
pub const HTTP_137: ErrorInfo = ErrorInfo {
    code: "HTTP_137",
    message: "remote function is not allowed in '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_138: Remote function with the wrong name
pub const HTTP_138: ErrorInfo = ErrorInfo {
    code: "HTTP_138",
    message: "invalid remote function: '{}'. '{}' can have only the remote function '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_139: More than one response parameter
pub const HTTP_139: ErrorInfo = ErrorInfo {
    code: "HTTP_139",
    message: "invalid multiple 'http:Response' parameter: '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_140: Remote handler parameter of an unsupported type
pub const HTTP_140: ErrorInfo = ErrorInfo {
    code: "HTTP_140",
    message: "invalid parameter type: '{}' in interceptor remote function",
    severity: Severity::Error,
    hint: Some("allowed parameters are 'http:RequestContext', 'http:Caller', 'http:Response' and 'error'"),
};

/// HTTP_141: Remote handler return type outside the interceptor contract
pub const HTTP_141: ErrorInfo = ErrorInfo {
    code: "HTTP_141",
    message: "invalid interceptor remote function return type: expected 'anydata|http:Response|http:NextService|error?', but found '{}'",
    severity: Severity::Error,
    hint: None,
};

/// HTTP_143: Error interceptor handler without an error parameter
pub const HTTP_143: ErrorInfo = ErrorInfo {
    code: "HTTP_143",
    message: "missing error parameter in the interceptor {} function",
    severity: Severity::Error,
    hint: Some("error interceptors receive the error as an 'error' typed parameter"),
};

/// Every catalog entry, in code order
pub static CATALOG: &[&ErrorInfo] = &[
    &SEMA_UNDEFINED_MODULE,
    &SEMA_UNKNOWN_TYPE,
    &SEMA_REDECLARED_MEMBER,
    &SEMA_DUPLICATE_PREFIX,
    &HTTP_106,
    &HTTP_115,
    &HTTP_116,
    &HTTP_117,
    &HTTP_121,
    &HTTP_122,
    &HTTP_123,
    &HTTP_124,
    &HTTP_126,
    &HTTP_127,
    &HTTP_128,
    &HTTP_132,
    &HTTP_135,
    &HTTP_136,
    &HTTP_137,
    &HTTP_138,
    &HTTP_139,
    &HTTP_140,
    &HTTP_141,
    &HTTP_143,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_substitutes_in_order() {
        assert_eq!(
            HTTP_138.format(&["interceptResponse", "ResponseErrorInterceptor", "interceptResponseError"]),
            "invalid remote function: 'interceptResponse'. 'ResponseErrorInterceptor' can have only the remote function 'interceptResponseError'"
        );
    }

    #[test]
    fn format_tolerates_missing_and_extra_args() {
        assert_eq!(HTTP_123.format(&[]), "invalid multiple interceptor type reference: ''");
        assert_eq!(
            HTTP_124.format(&["ignored"]),
            "invalid multiple interceptor resource functions"
        );
    }

    #[test]
    fn catalog_codes_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }

    #[test]
    fn interceptor_codes_are_errors() {
        assert!(
            CATALOG
                .iter()
                .filter(|info| info.code.starts_with("HTTP_"))
                .all(|info| info.severity == Severity::Error)
        );
    }

    #[test]
    fn lookup_finds_entries() {
        assert_eq!(lookup("HTTP_140").map(|i| i.arity()), Some(1));
        assert_eq!(lookup("HTTP_135").map(|i| i.arity()), Some(2));
        assert!(lookup("HTTP_999").is_none());
    }

    #[test]
    fn severity_equality() {
        assert_eq!(Severity::Error, Severity::Error);
        assert_ne!(Severity::Error, Severity::Warning);
        assert_ne!(Severity::Warning, Severity::Note);
    }
}

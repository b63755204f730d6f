// src/interceptor/resource.rs
//
// Deep validation of the resource handler of a request-side interceptor.

use crate::errors::codes::{HTTP_106, HTTP_127, HTTP_128, HTTP_143};
use crate::frontend::ast::{FunctionDecl, FunctionKind, PathSegment, ResourcePath, TypeExprKind};
use crate::sema::Lookup;

use super::params::{ParamRole, check_params};
use super::role::InterceptorRole;
use super::{CheckContext, Reporter};

/// Validates the accessor, path and parameters of a resource handler
pub trait ResourceValidator: Send + Sync {
    fn validate(
        &self,
        cx: &CheckContext<'_>,
        handler: &FunctionDecl,
        role: InterceptorRole,
        reporter: &mut Reporter<'_>,
    );
}

/// The handler must be `resource function 'default [string... path]` and
/// may only ask for pipeline objects (plus the error for error roles).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResourceValidator;

impl ResourceValidator for DefaultResourceValidator {
    fn validate(
        &self,
        cx: &CheckContext<'_>,
        handler: &FunctionDecl,
        role: InterceptorRole,
        reporter: &mut Reporter<'_>,
    ) {
        if let FunctionKind::Resource {
            accessor,
            accessor_span,
            path,
        } = &handler.kind
        {
            if accessor != "default" {
                reporter.report(&HTTP_128, *accessor_span, &[accessor.as_str()]);
            }
            if !is_rest_path(path) {
                reporter.report(&HTTP_127, path.span, &[path.text().as_str()]);
            }
        }

        let Lookup::Found(symbol) = cx.query.method_symbol(handler) else {
            return;
        };
        let Some(params) = symbol.params.found() else {
            return;
        };

        let mut allowed = vec![
            ParamRole::RequestContext,
            ParamRole::Caller,
            ParamRole::Request,
            ParamRole::Headers,
        ];
        if role == InterceptorRole::RequestErrorInterceptor {
            allowed.push(ParamRole::Error);
        }
        let slots = check_params(handler, params, &allowed, &HTTP_106, cx, reporter);
        if role.requires_error_param() && !slots.has_error() {
            reporter.report(&HTTP_143, handler.span, &["resource"]);
        }
    }
}

/// `[string... path]`, the only path an interceptor resource may declare
fn is_rest_path(path: &ResourcePath) -> bool {
    match path.segments.as_slice() {
        [PathSegment::Rest { ty, .. }] => matches!(
            &ty.kind,
            TypeExprKind::Named { prefix: None, name } if name == "string"
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Span;
    use crate::frontend::ast::TypeExpr;

    fn path(segments: Vec<PathSegment>) -> ResourcePath {
        ResourcePath {
            segments,
            span: Span::default(),
        }
    }

    fn named(name: &str) -> TypeExpr {
        TypeExpr {
            kind: TypeExprKind::Named {
                prefix: None,
                name: name.to_string(),
            },
            span: Span::default(),
        }
    }

    #[test]
    fn rest_path_must_be_string() {
        assert!(is_rest_path(&path(vec![PathSegment::Rest {
            ty: named("string"),
            name: "path".into(),
        }])));
        assert!(!is_rest_path(&path(vec![PathSegment::Rest {
            ty: named("int"),
            name: "path".into(),
        }])));
    }

    #[test]
    fn other_paths_are_rejected() {
        assert!(!is_rest_path(&path(Vec::new())));
        assert!(!is_rest_path(&path(vec![PathSegment::Name("greeting".into())])));
        assert!(!is_rest_path(&path(vec![
            PathSegment::Name("api".into()),
            PathSegment::Rest {
                ty: named("string"),
                name: "path".into(),
            },
        ])));
    }
}

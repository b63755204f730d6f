// src/interceptor/returns.rs

use crate::errors::ErrorInfo;
use crate::frontend::ast::FunctionDecl;
use crate::sema::well_known::is_anydata_builtin;
use crate::sema::{
    FoundationModule, Lookup, ReferencedKind, ReferencedType, TypeDescKind, TypeSymbol,
};

use super::{CheckContext, Reporter};

/// Validates a handler's declared return type, reporting `code` on failure
pub trait ReturnTypeValidator: Send + Sync {
    fn validate(
        &self,
        cx: &CheckContext<'_>,
        handler: &FunctionDecl,
        code: &'static ErrorInfo,
        reporter: &mut Reporter<'_>,
    );
}

/// Accepts `anydata|http:Response|http:NextService|error?` and anything
/// narrower. A missing return type is nil.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReturnTypeValidator;

impl ReturnTypeValidator for DefaultReturnTypeValidator {
    fn validate(
        &self,
        cx: &CheckContext<'_>,
        handler: &FunctionDecl,
        code: &'static ErrorInfo,
        reporter: &mut Reporter<'_>,
    ) {
        let Lookup::Found(symbol) = cx.query.method_symbol(handler) else {
            return;
        };
        let Some(return_type) = &symbol.return_type else {
            return;
        };
        if is_allowed(return_type, cx.foundation) {
            return;
        }

        let anchor = handler
            .return_type
            .as_ref()
            .map_or(handler.span, |ty| ty.span);
        reporter.report(code, anchor, &[return_type.signature.as_str()]);
    }
}

fn is_allowed(ty: &TypeSymbol, foundation: &FoundationModule) -> bool {
    match &ty.kind {
        TypeDescKind::Nil | TypeDescKind::Error | TypeDescKind::Unknown => true,
        TypeDescKind::Reference(reference) => {
            is_data(ty) || is_foundation_object(reference, foundation, &["Response", "NextService"])
        }
        TypeDescKind::Optional(inner) => is_allowed(inner, foundation),
        TypeDescKind::Union(members) => members.iter().all(|m| is_allowed(m, foundation)),
        TypeDescKind::Builtin(_) | TypeDescKind::Array(_) => is_data(ty),
    }
}

/// Plain data: anydata builtins, records, local aliases and structures of them
fn is_data(ty: &TypeSymbol) -> bool {
    match &ty.kind {
        TypeDescKind::Nil => true,
        TypeDescKind::Builtin(name) => is_anydata_builtin(name),
        TypeDescKind::Reference(reference) => {
            matches!(reference.kind, ReferencedKind::Record | ReferencedKind::Alias)
        }
        TypeDescKind::Optional(inner) | TypeDescKind::Array(inner) => is_data(inner),
        TypeDescKind::Union(members) => members.iter().all(is_data),
        TypeDescKind::Error | TypeDescKind::Unknown => false,
    }
}

fn is_foundation_object(
    reference: &ReferencedType,
    foundation: &FoundationModule,
    names: &[&str],
) -> bool {
    matches!(
        reference.kind,
        ReferencedKind::Object | ReferencedKind::ServiceObject
    ) && reference
        .module
        .found()
        .is_some_and(|module| foundation.declares(module))
        && reference
            .name
            .found()
            .is_some_and(|name| names.contains(&name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sema::ModuleSymbol;

    fn builtin(name: &str) -> TypeSymbol {
        TypeSymbol::new(name, TypeDescKind::Builtin(name.to_string()))
    }

    fn declared_in(kind: ReferencedKind, module: ModuleSymbol, name: &str) -> TypeSymbol {
        let signature = format!("{}:{}", module.name.found().map_or("", String::as_str), name);
        TypeSymbol::new(
            signature,
            TypeDescKind::Reference(ReferencedType {
                kind,
                module: Lookup::Found(module),
                name: Lookup::Found(name.to_string()),
            }),
        )
    }

    fn reference(kind: ReferencedKind, module: &str, name: &str) -> TypeSymbol {
        declared_in(kind, ModuleSymbol::named(None, module), name)
    }

    fn union(members: Vec<TypeSymbol>) -> TypeSymbol {
        TypeSymbol::new("u", TypeDescKind::Union(members))
    }

    fn allowed(ty: &TypeSymbol) -> bool {
        is_allowed(ty, &FoundationModule::default())
    }

    #[test]
    fn contract_members_are_allowed() {
        let ty = TypeSymbol::new(
            "http:NextService|error?",
            TypeDescKind::Optional(Box::new(union(vec![
                reference(ReferencedKind::ServiceObject, "http", "NextService"),
                TypeSymbol::new("error", TypeDescKind::Error),
            ]))),
        );
        assert!(allowed(&ty));
        assert!(allowed(&reference(ReferencedKind::Object, "http", "Response")));
        assert!(allowed(&builtin("json")));
        assert!(allowed(&reference(ReferencedKind::Record, "http", "Ok")));
    }

    #[test]
    fn arrays_of_data() {
        let strings = TypeSymbol::new("string[]", TypeDescKind::Array(Box::new(builtin("string"))));
        assert!(allowed(&strings));
        let responses = TypeSymbol::new(
            "http:Response[]",
            TypeDescKind::Array(Box::new(reference(ReferencedKind::Object, "http", "Response"))),
        );
        assert!(!allowed(&responses));
    }

    #[test]
    fn other_objects_are_rejected() {
        assert!(!allowed(&reference(ReferencedKind::Object, "http", "Caller")));
        assert!(!allowed(&reference(ReferencedKind::Object, "web", "Response")));
        assert!(!allowed(&reference(
            ReferencedKind::Opaque,
            "io",
            "ReadableByteChannel"
        )));
        assert!(!allowed(&builtin("stream<int>")));
        assert!(!allowed(&union(vec![builtin("string"), builtin("any")])));
    }

    #[test]
    fn same_named_module_must_match_org() {
        let local = declared_in(ReferencedKind::Object, ModuleSymbol::local("http"), "Response");
        assert!(!allowed(&local));

        let other_org = declared_in(
            ReferencedKind::Object,
            ModuleSymbol::named(Some("acme"), "http"),
            "NextService",
        );
        assert!(!allowed(&other_org));

        let foundation = declared_in(
            ReferencedKind::Object,
            ModuleSymbol::named(Some("ballerina"), "http"),
            "Response",
        );
        assert!(allowed(&foundation));
    }
}

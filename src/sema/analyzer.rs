// src/sema/analyzer.rs
//
// Builds the semantic model for one compilation unit: import prefixes,
// locally declared types, and a resolved symbol for every method.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::codes::{
    SEMA_DUPLICATE_PREFIX, SEMA_REDECLARED_MEMBER, SEMA_UNDEFINED_MODULE, SEMA_UNKNOWN_TYPE,
};
use crate::errors::{Diagnostic, DiagnosticBuilder, ErrorInfo};
use crate::frontend::Span;
use crate::frontend::ast::*;
use crate::sema::query::SemanticQuery;
use crate::sema::symbols::{
    Lookup, MethodSymbol, ModuleSymbol, ParameterSymbol, ReferencedKind, ReferencedType,
    TypeDescKind, TypeSymbol,
};
use crate::sema::well_known::{self, FoundationModule, WellKnownKind};

/// Semantic information for one compilation unit
#[derive(Debug, Clone, Default)]
pub struct SemanticModel {
    diagnostics: Vec<Diagnostic>,
    methods: FxHashMap<NodeId, Lookup<MethodSymbol>>,
    foundation_prefixes: FxHashSet<String>,
}

impl SemanticQuery for SemanticModel {
    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn is_foundation_prefix(&self, prefix: &str) -> bool {
        self.foundation_prefixes.contains(prefix)
    }

    fn method_symbol(&self, function: &FunctionDecl) -> Lookup<&MethodSymbol> {
        match self.methods.get(&function.id) {
            Some(lookup) => lookup.as_ref(),
            None => Lookup::NotFound,
        }
    }
}

pub struct Analyzer<'a> {
    builder: &'a DiagnosticBuilder,
    foundation: &'a FoundationModule,
    /// Name reported for types declared in this unit
    unit_module: String,
    modules: FxHashMap<String, Lookup<ModuleSymbol>>,
    /// Prefixes bound to the foundation module
    foundation_prefixes: FxHashSet<String>,
    local_types: FxHashMap<String, ReferencedKind>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Analyzer<'a> {
    pub fn new(builder: &'a DiagnosticBuilder, foundation: &'a FoundationModule) -> Self {
        let unit_module = Path::new(builder.file())
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(".")
            .to_string();
        Self {
            builder,
            foundation,
            unit_module,
            modules: FxHashMap::default(),
            foundation_prefixes: FxHashSet::default(),
            local_types: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    #[tracing::instrument(skip_all, fields(file = %self.builder.file()))]
    pub fn analyze(mut self, program: &Program) -> SemanticModel {
        self.collect_imports(&program.imports);
        self.collect_local_types(program);

        let mut methods = FxHashMap::default();
        for class in &program.classes {
            for type_ref in &class.type_refs {
                self.resolve_named(type_ref.prefix.as_deref(), &type_ref.name, type_ref.span);
            }
            for field in &class.fields {
                self.resolve_type(&field.ty);
            }
            self.collect_methods(class, &mut methods);
        }

        tracing::debug!(
            methods = methods.len(),
            diagnostics = self.diagnostics.len(),
            "semantic model built"
        );
        SemanticModel {
            diagnostics: self.diagnostics,
            methods,
            foundation_prefixes: self.foundation_prefixes,
        }
    }

    fn collect_imports(&mut self, imports: &[ImportDecl]) {
        for import in imports {
            let prefix = import.effective_prefix().to_string();
            if self.modules.contains_key(&prefix) {
                self.report(&SEMA_DUPLICATE_PREFIX, import.span, &[prefix.as_str()]);
                self.foundation_prefixes.remove(&prefix);
                self.modules.insert(prefix, Lookup::Ambiguous);
                continue;
            }

            let name = import.module.rsplit('.').next().unwrap_or(&import.module);
            if self.foundation.is_imported_by(import) {
                tracing::trace!(%prefix, "foundation module imported");
                self.foundation_prefixes.insert(prefix.clone());
            }
            self.modules.insert(
                prefix,
                Lookup::Found(ModuleSymbol::named(import.org.as_deref(), name)),
            );
        }
    }

    fn collect_local_types(&mut self, program: &Program) {
        let declared = program
            .type_defs
            .iter()
            .map(|def| {
                let kind = match def.kind {
                    TypeDefKind::Record => ReferencedKind::Record,
                    TypeDefKind::Object => ReferencedKind::Object,
                    TypeDefKind::Other => ReferencedKind::Alias,
                };
                (&def.name, kind, def.span)
            })
            .chain(program.classes.iter().map(|class| {
                let kind = if class.qualifiers.contains(&Qualifier::Service) {
                    ReferencedKind::ServiceObject
                } else {
                    ReferencedKind::Object
                };
                (&class.name, kind, class.name_span)
            }));

        for (name, kind, span) in declared {
            if self.local_types.contains_key(name) {
                self.report(&SEMA_REDECLARED_MEMBER, span, &[name.as_str()]);
                continue;
            }
            self.local_types.insert(name.clone(), kind);
        }
    }

    fn collect_methods(
        &mut self,
        class: &ClassDecl,
        methods: &mut FxHashMap<NodeId, Lookup<MethodSymbol>>,
    ) {
        let mut by_key: FxHashMap<String, NodeId> = FxHashMap::default();
        for function in &class.functions {
            let key = member_key(function);
            if let Some(first) = by_key.get(&key) {
                self.report(&SEMA_REDECLARED_MEMBER, function.name_span, &[key.as_str()]);
                methods.insert(*first, Lookup::Ambiguous);
                methods.insert(function.id, Lookup::Ambiguous);
                continue;
            }
            by_key.insert(key, function.id);

            let symbol = self.method_symbol(function);
            methods.insert(function.id, Lookup::Found(symbol));
        }
    }

    fn method_symbol(&mut self, function: &FunctionDecl) -> MethodSymbol {
        let mut params = Vec::with_capacity(function.params.len());
        let mut resolved = true;
        for param in &function.params {
            let ty = self.resolve_type(&param.ty);
            resolved &= ty.kind != TypeDescKind::Unknown;
            params.push(ParameterSymbol {
                name: param.name.clone(),
                ty,
                span: Some(param.span),
            });
        }
        let return_type = function.return_type.as_ref().map(|ty| self.resolve_type(ty));

        MethodSymbol {
            name: function.name.clone(),
            qualifiers: function.qualifiers.clone(),
            params: if resolved {
                Lookup::Found(params)
            } else {
                Lookup::NotFound
            },
            return_type,
        }
    }

    fn resolve_type(&mut self, ty: &TypeExpr) -> TypeSymbol {
        let signature = ty.text();
        match &ty.kind {
            TypeExprKind::Named { prefix, name } => {
                let kind = self.resolve_named(prefix.as_deref(), name, ty.span);
                TypeSymbol::new(signature, kind)
            }
            TypeExprKind::Error(_) => TypeSymbol::new(signature, TypeDescKind::Error),
            TypeExprKind::Nil => TypeSymbol::new(signature, TypeDescKind::Nil),
            TypeExprKind::Optional(inner) => {
                let inner = self.resolve_type(inner);
                TypeSymbol::new(signature, TypeDescKind::Optional(Box::new(inner)))
            }
            TypeExprKind::Array(inner) => {
                let inner = self.resolve_type(inner);
                TypeSymbol::new(signature, TypeDescKind::Array(Box::new(inner)))
            }
            TypeExprKind::Union(members) => {
                let members = members.iter().map(|member| self.resolve_type(member)).collect();
                TypeSymbol::new(signature, TypeDescKind::Union(members))
            }
            TypeExprKind::Paren(inner) => {
                let inner = self.resolve_type(inner);
                TypeSymbol::new(signature, inner.kind)
            }
        }
    }

    fn resolve_named(&mut self, prefix: Option<&str>, name: &str, span: Span) -> TypeDescKind {
        let Some(prefix) = prefix else {
            return self.resolve_unprefixed(name, span);
        };

        let module = match self.modules.get(prefix) {
            Some(module) => module.clone(),
            None if well_known::is_predeclared_prefix(prefix) => {
                let lang = format!("lang.{}", prefix);
                Lookup::Found(ModuleSymbol::named(Some("ballerina"), &lang))
            }
            None => {
                self.report(&SEMA_UNDEFINED_MODULE, span, &[prefix]);
                return TypeDescKind::Unknown;
            }
        };

        if !module.is_found() || !self.foundation_prefixes.contains(prefix) {
            return TypeDescKind::Reference(ReferencedType {
                kind: ReferencedKind::Opaque,
                module,
                name: Lookup::Found(name.to_string()),
            });
        }

        let kind = match well_known::foundation_type(name) {
            Some(WellKnownKind::Error) => return TypeDescKind::Error,
            Some(WellKnownKind::Object) => ReferencedKind::Object,
            Some(WellKnownKind::ServiceObject) => ReferencedKind::ServiceObject,
            Some(WellKnownKind::Record) => ReferencedKind::Record,
            None => {
                let written = format!("{}:{}", prefix, name);
                self.report(&SEMA_UNKNOWN_TYPE, span, &[written.as_str()]);
                return TypeDescKind::Unknown;
            }
        };
        TypeDescKind::Reference(ReferencedType {
            kind,
            module,
            name: Lookup::Found(name.to_string()),
        })
    }

    fn resolve_unprefixed(&mut self, name: &str, span: Span) -> TypeDescKind {
        if well_known::is_builtin(name) {
            return TypeDescKind::Builtin(name.to_string());
        }
        match self.local_types.get(name) {
            Some(kind) => TypeDescKind::Reference(ReferencedType {
                kind: *kind,
                module: Lookup::Found(ModuleSymbol::local(&self.unit_module)),
                name: Lookup::Found(name.to_string()),
            }),
            None => {
                self.report(&SEMA_UNKNOWN_TYPE, span, &[name]);
                TypeDescKind::Unknown
            }
        }
    }

    fn report(&mut self, info: &'static ErrorInfo, span: Span, args: &[&str]) {
        tracing::trace!(code = info.code, ?args, "upstream diagnostic");
        self.diagnostics.push(self.builder.emit(info, span, args));
    }
}

/// Name a member is declared under; resources are keyed by accessor and path
fn member_key(function: &FunctionDecl) -> String {
    match &function.kind {
        FunctionKind::Resource { accessor, path, .. } => format!("{} {}", accessor, path.text()),
        FunctionKind::Plain => function.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Parser;

    fn analyze(source: &str) -> (Program, SemanticModel) {
        let program = Parser::new(source).parse_program().unwrap();
        let builder = DiagnosticBuilder::new("svc.bal", source);
        let foundation = FoundationModule::default();
        let model = Analyzer::new(&builder, &foundation).analyze(&program);
        (program, model)
    }

    fn codes(model: &SemanticModel) -> Vec<&'static str> {
        model.diagnostics().iter().map(Diagnostic::code).collect()
    }

    #[test]
    fn resolves_foundation_parameters() {
        let (program, model) = analyze(
            r#"
import ballerina/http;
service class S {
    *http:ResponseInterceptor;
    remote function interceptResponse(http:Caller caller, http:Response res) returns http:NextService|error? {
    }
}
"#,
        );
        assert!(!model.has_errors(), "{:?}", codes(&model));
        let function = &program.classes[0].functions[0];
        let symbol = model.method_symbol(function);
        let Lookup::Found(symbol) = symbol else {
            panic!("expected method symbol");
        };
        assert!(symbol.is_remote());
        let params = symbol.params.found().unwrap();
        let caller = params[0].ty.as_reference().unwrap();
        assert_eq!(caller.kind, ReferencedKind::Object);
        assert_eq!(caller.module_name(), Some("http"));
        assert_eq!(caller.name, Lookup::Found("Caller".to_string()));
        assert_eq!(params[0].name.as_deref(), Some("caller"));
        assert!(params[0].span.is_some());
        assert!(matches!(
            symbol.return_type.as_ref().map(|ty| &ty.kind),
            Some(TypeDescKind::Optional(_))
        ));
    }

    #[test]
    fn aliased_import_prefix_resolves() {
        let (_, model) = analyze(
            "import ballerina/http as web;\nservice class S { *web:RequestInterceptor; }",
        );
        assert!(!model.has_errors());
    }

    #[test]
    fn undefined_prefix_is_upstream_error() {
        let (_, model) = analyze("service class S { *http:RequestInterceptor; }");
        assert_eq!(codes(&model), vec!["E2001"]);
        assert!(model.has_errors());
    }

    #[test]
    fn unknown_foundation_type_is_upstream_error() {
        let (_, model) = analyze(
            "import ballerina/http;\nservice class S { function f(http:Calller c) {} }",
        );
        assert_eq!(codes(&model), vec!["E2002"]);
        assert_eq!(
            model.diagnostics()[0].formatted_message,
            "unknown type 'http:Calller'"
        );
    }

    #[test]
    fn unresolved_parameter_leaves_params_unresolved() {
        let (program, model) = analyze("service class S { function f(Missing m) {} }");
        let symbol = model.method_symbol(&program.classes[0].functions[0]);
        assert_eq!(symbol.found().map(|s| s.params.is_found()), Some(false));
    }

    #[test]
    fn local_types_and_builtins_resolve() {
        let (program, model) = analyze(
            r#"
type Payload record {| string id; |};
class Helper {}
service class S {
    function f(Payload p, Helper h, map<json> m, string[] names) returns Payload|error {}
}
"#,
        );
        assert!(!model.has_errors(), "{:?}", codes(&model));
        let symbol = model.method_symbol(&program.classes[1].functions[0]);
        let params = symbol.found().and_then(|s| s.params.found()).unwrap();
        let payload = params[0].ty.as_reference().unwrap();
        assert_eq!(payload.kind, ReferencedKind::Record);
        assert_eq!(payload.module_name(), Some("svc"));
        assert!(payload.module.found().is_some_and(ModuleSymbol::is_local));
        assert_eq!(
            params[1].ty.as_reference().map(|r| r.kind),
            Some(ReferencedKind::Object)
        );
        assert_eq!(params[2].ty.kind, TypeDescKind::Builtin("map<json>".to_string()));
        assert!(matches!(params[3].ty.kind, TypeDescKind::Array(_)));
    }

    #[test]
    fn other_modules_resolve_opaquely() {
        let (program, model) = analyze(
            "import ballerina/io;\nservice class S { function f(io:ReadableByteChannel ch, string:Char c) {} }",
        );
        assert!(!model.has_errors());
        let symbol = model.method_symbol(&program.classes[0].functions[0]);
        let params = symbol.found().and_then(|s| s.params.found()).unwrap();
        let channel = params[0].ty.as_reference().unwrap();
        assert_eq!(channel.kind, ReferencedKind::Opaque);
        assert_eq!(channel.module_name(), Some("io"));
        assert_eq!(
            params[1].ty.as_reference().and_then(|r| r.module_name()),
            Some("lang.string")
        );
    }

    #[test]
    fn foundation_errors_are_error_types() {
        let (program, model) = analyze(
            "import ballerina/http;\nservice class S { function f(http:ClientError e) {} }",
        );
        let symbol = model.method_symbol(&program.classes[0].functions[0]);
        let params = symbol.found().and_then(|s| s.params.found()).unwrap();
        assert_eq!(params[0].ty.kind, TypeDescKind::Error);
    }

    #[test]
    fn redeclared_methods_become_ambiguous() {
        let (program, model) = analyze(
            r#"
service class S {
    remote function interceptResponse() {}
    remote function interceptResponse() {}
    function other() {}
}
"#,
        );
        assert_eq!(codes(&model), vec!["E2003"]);
        let functions = &program.classes[0].functions;
        assert_eq!(model.method_symbol(&functions[0]), Lookup::Ambiguous);
        assert_eq!(model.method_symbol(&functions[1]), Lookup::Ambiguous);
        assert!(model.method_symbol(&functions[2]).is_found());
    }

    #[test]
    fn resources_are_keyed_by_accessor_and_path() {
        let (_, model) = analyze(
            r#"
service class S {
    resource function get a() {}
    resource function post a() {}
    resource function get b() {}
}
"#,
        );
        assert!(!model.has_errors());
    }

    #[test]
    fn duplicate_prefix_makes_module_ambiguous() {
        let (program, model) = analyze(
            r#"
import ballerina/http;
import acme/http;
service class S { function f(http:Caller c) {} }
"#,
        );
        assert_eq!(codes(&model), vec!["E2004"]);
        let symbol = model.method_symbol(&program.classes[0].functions[0]);
        let params = symbol.found().and_then(|s| s.params.found()).unwrap();
        let caller = params[0].ty.as_reference().unwrap();
        assert_eq!(caller.module, Lookup::Ambiguous);
        assert_eq!(caller.module_name(), None);
    }

    #[test]
    fn redeclared_top_level_type() {
        let (_, model) = analyze("type A record {};\nclass A {}");
        assert_eq!(codes(&model), vec!["E2003"]);
    }

    #[test]
    fn foreign_org_with_foundation_name_is_not_foundation() {
        let (program, model) = analyze(
            "import acme/http;\nservice class S { function f(http:Caller c) {} }",
        );
        assert!(!model.has_errors());
        let symbol = model.method_symbol(&program.classes[0].functions[0]);
        let params = symbol.found().and_then(|s| s.params.found()).unwrap();
        let caller = params[0].ty.as_reference().unwrap();
        assert_eq!(caller.kind, ReferencedKind::Opaque);
    }
}

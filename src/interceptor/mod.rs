// src/interceptor/mod.rs
//! Interceptor service validation.
//!
//! A `service class` that includes one of the http interceptor types must
//! declare exactly one handler of the right form:
//!
//! | role                       | handler                                          |
//! |----------------------------|--------------------------------------------------|
//! | `RequestInterceptor`       | `resource function 'default [string... path]`    |
//! | `RequestErrorInterceptor`  | same, with an `error` parameter                  |
//! | `ResponseInterceptor`      | `remote function interceptResponse`              |
//! | `ResponseErrorInterceptor` | `remote function interceptResponseError(error)`  |
//!
//! [`InterceptorServiceValidator::validate`] runs once per class and hands
//! every violation to a [`DiagnosticSink`].

pub mod members;
pub mod params;
pub mod resource;
pub mod returns;
pub mod role;
pub mod slot;


use crate::errors::codes::{HTTP_126, HTTP_141};
use crate::errors::{Diagnostic, DiagnosticBuilder, DiagnosticSink, ErrorInfo};
use crate::frontend::Span;
use crate::frontend::ast::ClassDecl;
use crate::sema::{FoundationModule, SemanticQuery};

pub use members::{check_remote_name, select_handler};
pub use params::{ParamRole, validate_remote_params};
pub use resource::{DefaultResourceValidator, ResourceValidator};
pub use returns::{DefaultReturnTypeValidator, ReturnTypeValidator};
pub use role::{Classification, HandlerKind, InterceptorRole, classify};
pub use slot::Slot;

/// One class to validate, with the unit it was declared in
pub struct ClassContext<'a> {
    pub class: &'a ClassDecl,
    pub query: &'a dyn SemanticQuery,
    pub builder: &'a DiagnosticBuilder,
}

/// Read-only inputs shared by the checks of one run
pub struct CheckContext<'a> {
    pub query: &'a dyn SemanticQuery,
    /// Module handler objects must be declared in
    pub foundation: &'a FoundationModule,
}

/// Collects the diagnostics of one validation run in discovery order
pub struct Reporter<'a> {
    builder: &'a DiagnosticBuilder,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Reporter<'a> {
    pub fn new(builder: &'a DiagnosticBuilder) -> Self {
        Self {
            builder,
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, info: &'static ErrorInfo, span: Span, args: &[&str]) {
        tracing::trace!(code = info.code, line = span.line, ?args, "report");
        self.diagnostics.push(self.builder.emit(info, span, args));
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Validates interceptor service classes.
///
/// Holds only configuration, so one instance can validate many classes,
/// concurrently if the caller wishes.
pub struct InterceptorServiceValidator {
    foundation: FoundationModule,
    resources: Box<dyn ResourceValidator>,
    returns: Box<dyn ReturnTypeValidator>,
}

impl InterceptorServiceValidator {
    pub fn new(foundation: FoundationModule) -> Self {
        Self {
            foundation,
            resources: Box::new(DefaultResourceValidator),
            returns: Box::new(DefaultReturnTypeValidator),
        }
    }

    pub fn with_resource_validator(mut self, validator: impl ResourceValidator + 'static) -> Self {
        self.resources = Box::new(validator);
        self
    }

    pub fn with_return_type_validator(
        mut self,
        validator: impl ReturnTypeValidator + 'static,
    ) -> Self {
        self.returns = Box::new(validator);
        self
    }

    pub fn foundation(&self) -> &FoundationModule {
        &self.foundation
    }

    /// Validate one class. Nothing is checked when the unit already has
    /// errors; member checks are skipped when the role is ambiguous.
    #[tracing::instrument(skip_all, fields(class = %ctx.class.name))]
    pub fn validate(&self, ctx: &ClassContext<'_>, sink: &mut dyn DiagnosticSink) {
        if ctx.query.has_errors() {
            tracing::debug!("unit has errors; skipping");
            return;
        }

        let cx = CheckContext {
            query: ctx.query,
            foundation: &self.foundation,
        };
        let mut reporter = Reporter::new(ctx.builder);

        let role = match classify(ctx.class, ctx.query, &mut reporter) {
            Classification::NotApplicable | Classification::NotInterceptor => return,
            Classification::Ambiguous(role) => {
                tracing::debug!(%role, "ambiguous interceptor role");
                sink.report_all(reporter.finish());
                return;
            }
            Classification::Role(role) => role,
        };
        tracing::debug!(%role, "interceptor role");

        if let Some(handler) = select_handler(&cx, ctx.class, role, &mut reporter) {
            match role.handler_kind() {
                HandlerKind::Resource => {
                    self.resources.validate(&cx, handler, role, &mut reporter);
                    self.returns.validate(&cx, handler, &HTTP_126, &mut reporter);
                }
                HandlerKind::Remote => {
                    validate_remote_params(&cx, handler, role, &mut reporter);
                    self.returns.validate(&cx, handler, &HTTP_141, &mut reporter);
                }
            }
        }

        sink.report_all(reporter.finish());
    }
}

impl Default for InterceptorServiceValidator {
    fn default() -> Self {
        Self::new(FoundationModule::default())
    }
}

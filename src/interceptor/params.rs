// src/interceptor/params.rs
//
// Handler parameter checks. Every parameter is classified into one of the
// pipeline objects (or `error`); each object may be requested once.

use crate::errors::ErrorInfo;
use crate::errors::codes::{
    HTTP_115, HTTP_116, HTTP_117, HTTP_121, HTTP_122, HTTP_139, HTTP_140, HTTP_143,
};
use crate::frontend::ast::FunctionDecl;
use crate::sema::{
    FoundationModule, Lookup, ParameterSymbol, ReferencedKind, TypeDescKind, TypeSymbol,
};

use super::role::InterceptorRole;
use super::slot::Slot;
use super::{CheckContext, Reporter};

/// What a handler parameter asks the runtime to pass in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    Caller,
    Request,
    Response,
    RequestContext,
    Headers,
    Error,
}

impl ParamRole {
    fn from_object_name(name: &str) -> Option<Self> {
        match name {
            "Caller" => Some(ParamRole::Caller),
            "Request" => Some(ParamRole::Request),
            "Response" => Some(ParamRole::Response),
            "RequestContext" => Some(ParamRole::RequestContext),
            "Headers" => Some(ParamRole::Headers),
            _ => None,
        }
    }

    /// Reported for the second and later parameter of this role
    pub fn duplicate_code(self) -> &'static ErrorInfo {
        match self {
            ParamRole::Caller => &HTTP_115,
            ParamRole::Request => &HTTP_116,
            ParamRole::Response => &HTTP_139,
            ParamRole::RequestContext => &HTTP_121,
            ParamRole::Headers => &HTTP_117,
            ParamRole::Error => &HTTP_122,
        }
    }
}

/// Classify a parameter type. `None` for anything that is neither an
/// object of the foundation module nor an error type.
pub fn param_role(ty: &TypeSymbol, foundation: &FoundationModule) -> Option<ParamRole> {
    match &ty.kind {
        TypeDescKind::Error => Some(ParamRole::Error),
        TypeDescKind::Reference(reference) => {
            if reference.kind != ReferencedKind::Object {
                return None;
            }
            if !foundation.declares(reference.module.found()?) {
                return None;
            }
            ParamRole::from_object_name(reference.name.found()?)
        }
        _ => None,
    }
}

/// One slot per parameter role, holding the first claiming parameter's index
#[derive(Debug, Default)]
pub struct ParamSlots {
    caller: Slot<usize>,
    request: Slot<usize>,
    response: Slot<usize>,
    request_context: Slot<usize>,
    headers: Slot<usize>,
    error: Slot<usize>,
}

impl ParamSlots {
    pub fn slot(&mut self, role: ParamRole) -> &mut Slot<usize> {
        match role {
            ParamRole::Caller => &mut self.caller,
            ParamRole::Request => &mut self.request,
            ParamRole::Response => &mut self.response,
            ParamRole::RequestContext => &mut self.request_context,
            ParamRole::Headers => &mut self.headers,
            ParamRole::Error => &mut self.error,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_claimed()
    }
}

/// Walk `params` in order. Parameters whose role is in `allowed` claim that
/// role's slot (later ones report the duplicate code); all others report
/// `invalid` with the type signature. Diagnostics anchor at the parameter,
/// or at the handler when the parameter has no location.
pub fn check_params(
    handler: &FunctionDecl,
    params: &[ParameterSymbol],
    allowed: &[ParamRole],
    invalid: &'static ErrorInfo,
    cx: &CheckContext<'_>,
    reporter: &mut Reporter<'_>,
) -> ParamSlots {
    let mut slots = ParamSlots::default();
    for (index, param) in params.iter().enumerate() {
        let anchor = param.span.unwrap_or(handler.span);
        match param_role(&param.ty, cx.foundation) {
            Some(role) if allowed.contains(&role) => {
                if slots.slot(role).claim(index).is_err() {
                    let name = param.name.as_deref().unwrap_or("");
                    reporter.report(role.duplicate_code(), anchor, &[name]);
                }
            }
            _ => reporter.report(invalid, anchor, &[param.ty.signature.as_str()]),
        }
    }
    slots
}

/// Parameter validation for the remote handler of a response-side role
pub fn validate_remote_params(
    cx: &CheckContext<'_>,
    handler: &FunctionDecl,
    role: InterceptorRole,
    reporter: &mut Reporter<'_>,
) {
    let Lookup::Found(symbol) = cx.query.method_symbol(handler) else {
        tracing::debug!(handler = %handler.name, "no method symbol; skipping parameters");
        return;
    };
    let Some(params) = symbol.params.found() else {
        tracing::debug!(handler = %handler.name, "parameters unresolved; skipping");
        return;
    };

    let mut allowed = vec![
        ParamRole::Caller,
        ParamRole::Response,
        ParamRole::RequestContext,
    ];
    if role == InterceptorRole::ResponseErrorInterceptor {
        allowed.push(ParamRole::Error);
    }

    let slots = check_params(handler, params, &allowed, &HTTP_140, cx, reporter);
    if role == InterceptorRole::ResponseErrorInterceptor && !slots.has_error() {
        reporter.report(&HTTP_143, handler.span, &["remote"]);
    }
}

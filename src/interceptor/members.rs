// src/interceptor/members.rs
//
// Handler selection: finds the one member function that serves as the
// interceptor's handler and reports members that don't belong.

use crate::errors::codes::{HTTP_124, HTTP_132, HTTP_135, HTTP_136, HTTP_137, HTTP_138};
use crate::frontend::ast::{ClassDecl, FunctionDecl, Qualifier};
use crate::sema::Lookup;

use super::role::{HandlerKind, InterceptorRole};
use super::slot::Slot;
use super::{CheckContext, Reporter};

/// Scan the members of `class` for the handler `role` needs.
///
/// Returns `None` (after reporting HTTP_132 or HTTP_135) when no acceptable
/// handler exists.
pub fn select_handler<'c>(
    cx: &CheckContext<'_>,
    class: &'c ClassDecl,
    role: InterceptorRole,
    reporter: &mut Reporter<'_>,
) -> Option<&'c FunctionDecl> {
    let mut resource = Slot::new();
    let mut remote = Slot::new();

    for function in &class.functions {
        if function.is_resource() {
            if role.handler_kind() != HandlerKind::Resource {
                reporter.report(&HTTP_136, function.span, &[role.name()]);
                continue;
            }
            if let Err(extra) = resource.claim(function) {
                reporter.report(&HTTP_124, extra.span, &[]);
            }
        } else if is_remote(cx, function) {
            if role.handler_kind() == HandlerKind::Resource {
                reporter.report(&HTTP_137, function.span, &[role.name()]);
                continue;
            }
            if check_remote_name(role, function, reporter) && remote.claim(function).is_err() {
                tracing::trace!(function = %function.name, "additional remote handler ignored");
            }
        }
    }

    match role.handler_kind() {
        HandlerKind::Resource => {
            let handler = resource.into_inner();
            if handler.is_none() {
                reporter.report(&HTTP_132, class.span, &[role.name()]);
            }
            handler
        }
        HandlerKind::Remote => {
            let handler = remote.into_inner();
            if handler.is_none() {
                let required = role.remote_name().unwrap_or_default();
                reporter.report(&HTTP_135, class.span, &[role.name(), required]);
            }
            handler
        }
    }
}

/// Report HTTP_138 and reject `function` when its name is not the one
/// `role` requires
pub fn check_remote_name(
    role: InterceptorRole,
    function: &FunctionDecl,
    reporter: &mut Reporter<'_>,
) -> bool {
    let Some(required) = role.remote_name() else {
        return false;
    };
    if function.name == required {
        return true;
    }
    reporter.report(
        &HTTP_138,
        function.span,
        &[function.name.as_str(), role.name(), required],
    );
    false
}

/// Remote-ness comes from the method symbol; the declaration's own
/// qualifiers stand in when the symbol is unavailable.
fn is_remote(cx: &CheckContext<'_>, function: &FunctionDecl) -> bool {
    match cx.query.method_symbol(function) {
        Lookup::Found(symbol) => symbol.is_remote(),
        Lookup::NotFound | Lookup::Ambiguous => function.has_qualifier(Qualifier::Remote),
    }
}

//! Query interface for analyzed compilation units.
//!
//! Validators only ever see a unit through `SemanticQuery`, so tests can
//! hand them a model with gaps (unresolved or ambiguous symbols) that the
//! analyzer itself would never produce from valid source.

use crate::errors::Diagnostic;
use crate::frontend::ast::FunctionDecl;
use crate::sema::symbols::{Lookup, MethodSymbol};

/// Read-only view of the semantic information for one compilation unit
pub trait SemanticQuery {
    /// Diagnostics recorded while building the model
    fn diagnostics(&self) -> &[Diagnostic];

    /// Whether the unit already carries ERROR diagnostics
    fn has_errors(&self) -> bool {
        self.diagnostics().iter().any(Diagnostic::is_error)
    }

    /// Whether `prefix` is bound to the foundation module by an import
    fn is_foundation_prefix(&self, prefix: &str) -> bool;

    /// Resolved symbol for a method declared in the unit
    fn method_symbol(&self, function: &FunctionDecl) -> Lookup<&MethodSymbol>;
}

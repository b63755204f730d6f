// src/sema/mod.rs
pub mod analyzer;
pub mod query;
pub mod symbols;
pub mod well_known;

pub use analyzer::{Analyzer, SemanticModel};
pub use query::SemanticQuery;
pub use symbols::{
    LOCAL_ORG, Lookup, MethodSymbol, ModuleSymbol, ParameterSymbol, ReferencedKind, ReferencedType,
    TypeDescKind, TypeSymbol,
};
pub use well_known::FoundationModule;

// src/sema/symbols.rs
//
// Resolved symbols handed out by the semantic model. Every lookup that can
// fail is a `Lookup` so callers match on the missing and ambiguous cases.

use crate::frontend::Span;
use crate::frontend::ast::Qualifier;
use smallvec::SmallVec;

/// Outcome of a semantic lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// More than one declaration matched
    Ambiguous,
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Ambiguous => None,
        }
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Ambiguous => Lookup::Ambiguous,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Org of the unit being analyzed. Not a valid org name in source, so a
/// local module never matches an imported one.
pub const LOCAL_ORG: &str = "$anon";

/// A module a type was declared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSymbol {
    pub org: Option<String>,
    pub name: Lookup<String>,
}

impl ModuleSymbol {
    pub fn named(org: Option<&str>, name: &str) -> Self {
        Self {
            org: org.map(str::to_string),
            name: Lookup::Found(name.to_string()),
        }
    }

    /// The unit's own module
    pub fn local(name: &str) -> Self {
        Self::named(Some(LOCAL_ORG), name)
    }

    pub fn is_local(&self) -> bool {
        self.org.as_deref() == Some(LOCAL_ORG)
    }
}

/// What a named type reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencedKind {
    Object,
    /// Object types implemented by services (`http:NextService`, interceptors)
    ServiceObject,
    Record,
    /// Local `type` definition other than a record or object
    Alias,
    /// Declared in a module we have no table for
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedType {
    pub kind: ReferencedKind,
    pub module: Lookup<ModuleSymbol>,
    pub name: Lookup<String>,
}

impl ReferencedType {
    /// Module name, when both the module and its name resolved
    pub fn module_name(&self) -> Option<&str> {
        self.module
            .found()
            .and_then(|module| module.name.found())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescKind {
    Reference(ReferencedType),
    Error,
    Nil,
    /// `string`, `int`, `json`, `anydata`, ...
    Builtin(String),
    Optional(Box<TypeSymbol>),
    Array(Box<TypeSymbol>),
    Union(Vec<TypeSymbol>),
    /// Resolution failed; an upstream diagnostic was recorded
    Unknown,
}

/// A resolved type descriptor with the signature it was written as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub signature: String,
    pub kind: TypeDescKind,
}

impl TypeSymbol {
    pub fn new(signature: impl Into<String>, kind: TypeDescKind) -> Self {
        Self {
            signature: signature.into(),
            kind,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferencedType> {
        match &self.kind {
            TypeDescKind::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub name: Option<String>,
    pub ty: TypeSymbol,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub qualifiers: SmallVec<[Qualifier; 4]>,
    pub params: Lookup<Vec<ParameterSymbol>>,
    pub return_type: Option<TypeSymbol>,
}

impl MethodSymbol {
    pub fn is_remote(&self) -> bool {
        self.qualifiers.contains(&Qualifier::Remote)
    }
}

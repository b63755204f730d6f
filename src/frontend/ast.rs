// src/frontend/ast.rs

use smallvec::SmallVec;

use crate::frontend::Span;

/// Unique identifier for a function declaration, assigned by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
pub struct Program {
    pub imports: Vec<ImportDecl>,
    pub type_defs: Vec<TypeDefDecl>,
    pub classes: Vec<ClassDecl>,
}

/// `import org/name as prefix;`
#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub org: Option<String>,
    pub module: String,
    pub prefix: Option<String>,
    pub span: Span,
}

impl ImportDecl {
    /// Prefix used to reference the module; defaults to its last segment
    pub fn effective_prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .unwrap_or_else(|| self.module.rsplit('.').next().unwrap_or(&self.module))
    }

    /// `org/module` as written
    pub fn path(&self) -> String {
        match &self.org {
            Some(org) => format!("{}/{}", org, self.module),
            None => self.module.clone(),
        }
    }
}

/// `type Name <descriptor>;`, kept only as a name and a coarse kind
#[derive(Debug, Clone)]
pub struct TypeDefDecl {
    pub name: String,
    pub kind: TypeDefKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Record,
    Object,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Service,
    Isolated,
    Client,
    Readonly,
    Distinct,
    Public,
    Private,
    Final,
    Remote,
    Resource,
}

impl Qualifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Service => "service",
            Qualifier::Isolated => "isolated",
            Qualifier::Client => "client",
            Qualifier::Readonly => "readonly",
            Qualifier::Distinct => "distinct",
            Qualifier::Public => "public",
            Qualifier::Private => "private",
            Qualifier::Final => "final",
            Qualifier::Remote => "remote",
            Qualifier::Resource => "resource",
        }
    }
}

pub type Qualifiers = SmallVec<[Qualifier; 4]>;

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub qualifiers: Qualifiers,
    pub type_refs: Vec<TypeRef>,
    pub fields: Vec<FieldDecl>,
    pub functions: Vec<FunctionDecl>,
    pub span: Span,
    pub name_span: Span,
}

/// `*prefix:Name;` inclusion of an object type
#[derive(Debug, Clone)]
pub struct TypeRef {
    pub prefix: Option<String>,
    pub name: String,
    pub span: Span,
}

impl TypeRef {
    /// The reference as written, e.g. `http:RequestInterceptor`
    pub fn text(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub qualifiers: Qualifiers,
    pub ty: TypeExpr,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum FunctionKind {
    /// `resource function accessor path(...)`
    Resource {
        accessor: String,
        accessor_span: Span,
        path: ResourcePath,
    },
    /// Any other method, including `remote function`
    Plain,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub id: NodeId,
    pub kind: FunctionKind,
    pub qualifiers: Qualifiers,
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub span: Span,
    pub name_span: Span,
}

impl FunctionDecl {
    pub fn is_resource(&self) -> bool {
        matches!(self.kind, FunctionKind::Resource { .. })
    }

    pub fn has_qualifier(&self, qualifier: Qualifier) -> bool {
        self.qualifiers.contains(&qualifier)
    }
}

#[derive(Debug, Clone)]
pub struct ResourcePath {
    pub segments: Vec<PathSegment>,
    pub span: Span,
}

impl ResourcePath {
    /// Path as written, `.` for the root path
    pub fn text(&self) -> String {
        if self.segments.is_empty() {
            return ".".to_string();
        }
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Name(name) => name.clone(),
                PathSegment::Param { ty, name } => format!("[{} {}]", ty.text(), name),
                PathSegment::Rest { ty, name } => format!("[{}... {}]", ty.text(), name),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Debug, Clone)]
pub enum PathSegment {
    Name(String),
    Param { ty: TypeExpr, name: String },
    Rest { ty: TypeExpr, name: String },
}

#[derive(Debug, Clone)]
pub struct Param {
    pub annotations: Vec<Annotation>,
    pub ty: TypeExpr,
    pub name: Option<String>,
    pub rest: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Annotation {
    pub prefix: Option<String>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypeExprKind {
    /// `name` or `prefix:name`
    Named { prefix: Option<String>, name: String },
    /// `error` or `error<Detail>`
    Error(Option<Box<TypeExpr>>),
    /// `()`
    Nil,
    Optional(Box<TypeExpr>),
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    Paren(Box<TypeExpr>),
}

impl TypeExpr {
    /// Canonical textual signature, used in diagnostics
    pub fn text(&self) -> String {
        match &self.kind {
            TypeExprKind::Named {
                prefix: Some(prefix),
                name,
            } => format!("{}:{}", prefix, name),
            TypeExprKind::Named { prefix: None, name } => name.clone(),
            TypeExprKind::Error(None) => "error".to_string(),
            TypeExprKind::Error(Some(detail)) => format!("error<{}>", detail.text()),
            TypeExprKind::Nil => "()".to_string(),
            TypeExprKind::Optional(inner) => format!("{}?", inner.text()),
            TypeExprKind::Array(inner) => format!("{}[]", inner.text()),
            TypeExprKind::Union(members) => members
                .iter()
                .map(TypeExpr::text)
                .collect::<Vec<_>>()
                .join("|"),
            TypeExprKind::Paren(inner) => format!("({})", inner.text()),
        }
    }
}

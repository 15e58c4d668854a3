use std::fmt;

use triomphe::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Array,
    /// A bare sequence such as `IEnumerable<T>`; it has no count or length.
    Sequence,
    /// The resolver recognised the syntax but not the type.
    Error,
}

/// A resolved type. Two handles are equal when they describe the same type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle(Arc<TypeData>);

#[derive(PartialEq, Eq, Hash)]
struct TypeData {
    name: String,
    kind: TypeKind,
    element: Option<TypeHandle>,
    properties: Box<[String]>,
}

impl TypeHandle {
    pub fn new<'a>(
        name: impl Into<String>,
        kind: TypeKind,
        element: Option<TypeHandle>,
        properties: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self(Arc::new(TypeData {
            name: name.into(),
            kind,
            element,
            properties: properties.into_iter().map(str::to_owned).collect(),
        }))
    }

    pub fn error(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Error, None, [])
    }

    /// `element[]`, which exposes `Length`.
    pub fn array(element: TypeHandle) -> Self {
        let name = format!("{}[]", element.name());
        Self::new(name, TypeKind::Array, Some(element), ["Length"])
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    pub fn element(&self) -> Option<&TypeHandle> {
        self.0.element.as_ref()
    }

    pub fn properties(&self) -> &[String] {
        &self.0.properties
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.0.properties.iter().any(|property| property == name)
    }

    pub fn is_error(&self) -> bool {
        self.0.kind == TypeKind::Error
    }

    pub fn is_sequence(&self) -> bool {
        self.0.kind == TypeKind::Sequence
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.name(), self.kind())
    }
}

/// How a method is called, as far as rewrite rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodShape {
    /// No arguments besides an extension receiver.
    Parameterless,
    /// A single lambda argument.
    Predicate,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodHandle {
    name: String,
    declaring_type: String,
    arity: usize,
    is_extension: bool,
    shape: MethodShape,
    return_type: Option<TypeHandle>,
}

impl MethodHandle {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>, arity: usize) -> Self {
        let shape = if arity == 0 { MethodShape::Parameterless } else { MethodShape::Other };
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            arity,
            is_extension: false,
            shape,
            return_type: None,
        }
    }

    #[must_use]
    pub fn extension(mut self) -> Self {
        self.is_extension = true;
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: MethodShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn returning(mut self, return_type: TypeHandle) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Arguments at the call site, not counting an extension receiver.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_extension(&self) -> bool {
        self.is_extension
    }

    pub fn shape(&self) -> MethodShape {
        self.shape
    }

    pub fn return_type(&self) -> Option<&TypeHandle> {
        self.return_type.as_ref()
    }

    pub fn is_library_method(&self, declaring_type: &str, name: &str, shape: MethodShape) -> bool {
        self.declaring_type == declaring_type && self.name == name && self.shape == shape
    }
}

/// Identity of a declaration, minted by a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolHandle(u32);

impl SymbolHandle {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

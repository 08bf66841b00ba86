use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Structural description of a type as delivered by a symbol table.
///
/// `name` is the simple metadata name, arity suffix included (`List`1`).
/// Wrapper shapes (array, pointer, by-reference) carry the wrapped type in
/// `shape`; their own `name`/`namespace` mirror the element for display only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub shape: TypeShape,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// A plain (possibly nested, possibly generic) type.
    Named {
        #[serde(default)]
        declaring: Option<Arc<TypeDescriptor>>,
        /// Parameters declared directly on this type, not on enclosing types.
        #[serde(default)]
        generic_parameters: Vec<String>,
        /// Arguments of a constructed type, one per own parameter.
        #[serde(default)]
        generic_arguments: Vec<TypeDescriptor>,
    },
    /// A reference to a generic parameter; the parameter name is the type name.
    GenericParameter,
    Array {
        element: Arc<TypeDescriptor>,
        rank: u32,
    },
    Pointer {
        element: Arc<TypeDescriptor>,
    },
    ByRef {
        element: Arc<TypeDescriptor>,
    },
}

impl Default for TypeShape {
    fn default() -> Self {
        TypeShape::Named {
            declaring: None,
            generic_parameters: Vec::new(),
            generic_arguments: Vec::new(),
        }
    }
}

impl TypeDescriptor {
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            is_interface: false,
            shape: TypeShape::default(),
        }
    }

    pub fn generic_parameter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            is_interface: false,
            shape: TypeShape::GenericParameter,
        }
    }

    /// Nest this type inside `declaring`. The namespace is taken from the
    /// outermost enclosing type.
    pub fn nested_in(mut self, declaring: TypeDescriptor) -> Self {
        self.namespace = declaring.namespace.clone();
        if let TypeShape::Named { declaring: slot, .. } = &mut self.shape {
            *slot = Some(Arc::new(declaring));
        }
        self
    }

    pub fn with_generic_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let TypeShape::Named {
            generic_parameters, ..
        } = &mut self.shape
        {
            *generic_parameters = names.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn with_generic_arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        if let TypeShape::Named {
            generic_arguments, ..
        } = &mut self.shape
        {
            *generic_arguments = arguments;
        }
        self
    }

    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    pub fn array(self, rank: u32) -> Self {
        let suffix = match rank {
            0 | 1 => "[]".to_string(),
            n => format!("[{}]", ",".repeat(n as usize - 1)),
        };
        self.wrap(&suffix, |element| TypeShape::Array { element, rank })
    }

    pub fn pointer(self) -> Self {
        self.wrap("*", |element| TypeShape::Pointer { element })
    }

    pub fn by_ref(self) -> Self {
        self.wrap("&", |element| TypeShape::ByRef { element })
    }

    fn wrap(self, suffix: &str, shape: impl FnOnce(Arc<TypeDescriptor>) -> TypeShape) -> Self {
        Self {
            name: format!("{}{}", self.name, suffix),
            namespace: self.namespace.clone(),
            is_interface: false,
            shape: shape(Arc::new(self)),
        }
    }

    pub fn is_generic_parameter(&self) -> bool {
        matches!(self.shape, TypeShape::GenericParameter)
    }

    /// The wrapped type of an array, pointer or by-reference descriptor.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            TypeShape::Array { element, .. }
            | TypeShape::Pointer { element }
            | TypeShape::ByRef { element } => Some(element.as_ref()),
            _ => None,
        }
    }

    pub fn declaring_type(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            TypeShape::Named { declaring, .. } => declaring.as_deref(),
            _ => None,
        }
    }

    pub fn generic_parameters(&self) -> &[String] {
        match &self.shape {
            TypeShape::Named {
                generic_parameters, ..
            } => generic_parameters,
            _ => &[],
        }
    }

    pub fn generic_arguments(&self) -> &[TypeDescriptor] {
        match &self.shape {
            TypeShape::Named {
                generic_arguments, ..
            } => generic_arguments,
            _ => &[],
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_parameters().is_empty() || !self.generic_arguments().is_empty()
    }

    /// Enclosing types from the outermost inwards, followed by this type.
    pub fn nesting_chain(&self) -> Vec<&TypeDescriptor> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(outer) = current.declaring_type() {
            chain.push(outer);
            current = outer;
        }
        chain.reverse();
        chain
    }

    /// Runtime-style full name: `Ns.Outer+Inner`, with the arguments of a
    /// constructed type appended as `[[Arg],[Arg]]` after the innermost name.
    pub fn full_name(&self) -> String {
        match &self.shape {
            TypeShape::GenericParameter => self.name.clone(),
            TypeShape::Array { element, rank } => {
                let dims = match rank {
                    0 | 1 => "[]".to_string(),
                    n => format!("[{}]", ",".repeat(*n as usize - 1)),
                };
                format!("{}{}", element.full_name(), dims)
            }
            TypeShape::Pointer { element } => format!("{}*", element.full_name()),
            TypeShape::ByRef { element } => format!("{}&", element.full_name()),
            TypeShape::Named { .. } => {
                let chain = self.nesting_chain();
                let path = chain
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join("+");
                // Nested types take their namespace from the outermost type.
                let namespace = &chain[0].namespace;
                let mut full = if namespace.is_empty() {
                    path
                } else {
                    format!("{}.{}", namespace, path)
                };

                let arguments: Vec<String> = chain
                    .iter()
                    .flat_map(|t| t.generic_arguments())
                    .map(|a| format!("[{}]", a.full_name()))
                    .collect();
                if !arguments.is_empty() {
                    full.push('[');
                    full.push_str(&arguments.join(","));
                    full.push(']');
                }
                full
            }
        }
    }
}

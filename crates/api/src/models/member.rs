use super::descriptor::TypeDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct MethodDescriptor {
    pub name: String,
    pub declaring: Arc<TypeDescriptor>,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// `None` for methods returning nothing.
    #[serde(default)]
    pub return_type: Option<TypeDescriptor>,
}

impl MethodDescriptor {
    pub const IMPLICIT_CONVERSION: &'static str = "op_Implicit";
    pub const EXPLICIT_CONVERSION: &'static str = "op_Explicit";

    pub fn new(declaring: impl Into<Arc<TypeDescriptor>>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring: declaring.into(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_generic_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, ty));
        self
    }

    pub fn returning(mut self, ty: TypeDescriptor) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn is_conversion_operator(&self) -> bool {
        self.name == Self::IMPLICIT_CONVERSION || self.name == Self::EXPLICIT_CONVERSION
    }
}

/// Constructors are never generic on their own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct ConstructorDescriptor {
    pub declaring: Arc<TypeDescriptor>,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl ConstructorDescriptor {
    pub const NAME: &'static str = "#ctor";

    pub fn new(declaring: impl Into<Arc<TypeDescriptor>>) -> Self {
        Self {
            declaring: declaring.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, ty));
        self
    }
}

/// A property, field or event: identified by name and declaring type only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct NamedMember {
    pub name: String,
    pub declaring: Arc<TypeDescriptor>,
}

impl NamedMember {
    pub fn new(declaring: impl Into<Arc<TypeDescriptor>>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring: declaring.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberDescriptor {
    Method(MethodDescriptor),
    Constructor(ConstructorDescriptor),
    Property(NamedMember),
    Field(NamedMember),
    Event(NamedMember),
}

impl MemberDescriptor {
    pub fn name(&self) -> &str {
        match self {
            MemberDescriptor::Method(m) => &m.name,
            MemberDescriptor::Constructor(_) => ConstructorDescriptor::NAME,
            MemberDescriptor::Property(m)
            | MemberDescriptor::Field(m)
            | MemberDescriptor::Event(m) => &m.name,
        }
    }

    pub fn declaring_type(&self) -> &TypeDescriptor {
        match self {
            MemberDescriptor::Method(m) => m.declaring.as_ref(),
            MemberDescriptor::Constructor(c) => c.declaring.as_ref(),
            MemberDescriptor::Property(m)
            | MemberDescriptor::Field(m)
            | MemberDescriptor::Event(m) => m.declaring.as_ref(),
        }
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        match self {
            MemberDescriptor::Method(m) => &m.parameters,
            MemberDescriptor::Constructor(c) => &c.parameters,
            _ => &[],
        }
    }
}

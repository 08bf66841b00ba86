use crate::error::DocIdError;
use indexmap::IndexMap;
use memberdoc_api::models::{ConstructorDescriptor, MethodDescriptor, TypeDescriptor};

/// Ordered name -> declaration index table for one declaration level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericParameterMap {
    indices: IndexMap<String, usize>,
}

impl GenericParameterMap {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut indices = IndexMap::new();
        for (index, name) in names.into_iter().enumerate() {
            indices.insert(name.into(), index);
        }
        Self { indices }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Generic parameters in scope while formatting one identifier.
///
/// The two levels are kept apart because references render differently:
/// `` `N `` for the declaring type, ``` ``N ``` for the member itself.
#[derive(Debug, Clone, Default)]
pub struct GenericContext {
    pub type_level: GenericParameterMap,
    pub method_level: GenericParameterMap,
}

impl GenericContext {
    /// Type-level parameters are numbered across the nesting chain,
    /// outermost enclosing type first.
    pub fn for_type(declaring: &TypeDescriptor) -> Self {
        let names = declaring
            .nesting_chain()
            .into_iter()
            .flat_map(|t| t.generic_parameters().iter().cloned());
        Self {
            type_level: GenericParameterMap::from_names(names),
            method_level: GenericParameterMap::default(),
        }
    }

    pub fn for_method(method: &MethodDescriptor) -> Self {
        Self {
            method_level: GenericParameterMap::from_names(
                method.generic_parameters.iter().cloned(),
            ),
            ..Self::for_type(&method.declaring)
        }
    }

    pub fn for_constructor(constructor: &ConstructorDescriptor) -> Self {
        Self::for_type(&constructor.declaring)
    }

    /// Render a generic-parameter reference. The member's own parameters
    /// shadow same-named parameters of the declaring type.
    pub fn reference(&self, name: &str) -> Result<String, DocIdError> {
        if let Some(index) = self.method_level.index_of(name) {
            return Ok(format!("``{}", index));
        }
        if let Some(index) = self.type_level.index_of(name) {
            return Ok(format!("`{}", index));
        }
        Err(DocIdError::UnresolvedGenericParameter {
            name: name.to_string(),
        })
    }
}

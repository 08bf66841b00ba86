use crate::models::{MemberDescriptor, TypeDescriptor};
use std::path::Path;

/// Source of symbol descriptors for one compiled unit.
///
/// Implementations wrap whatever actually reads program images; the core
/// only relies on receiving well-formed descriptors.
pub trait SymbolTable: Send + Sync {
    /// Location of the compiled unit the symbols belong to.
    fn owner(&self) -> &Path;

    /// Exported types, in the order they should be reported.
    fn exported_types(&self) -> Vec<TypeDescriptor>;

    /// Members declared directly on `ty`.
    fn members_of(&self, ty: &TypeDescriptor) -> Vec<MemberDescriptor>;
}

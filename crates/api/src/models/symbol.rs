use super::descriptor::TypeDescriptor;
use super::member::MemberDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier kind; its prefix letter opens every canonical identifier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Type,
    /// Methods and constructors.
    Method,
    Property,
    Field,
    Event,
}

impl SymbolKind {
    pub fn prefix(self) -> &'static str {
        match self {
            SymbolKind::Type => "T:",
            SymbolKind::Method => "M:",
            SymbolKind::Property => "P:",
            SymbolKind::Field => "F:",
            SymbolKind::Event => "E:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Type(TypeDescriptor),
    Member(MemberDescriptor),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Type(_) => SymbolKind::Type,
            Symbol::Member(MemberDescriptor::Method(_))
            | Symbol::Member(MemberDescriptor::Constructor(_)) => SymbolKind::Method,
            Symbol::Member(MemberDescriptor::Property(_)) => SymbolKind::Property,
            Symbol::Member(MemberDescriptor::Field(_)) => SymbolKind::Field,
            Symbol::Member(MemberDescriptor::Event(_)) => SymbolKind::Event,
        }
    }
}

impl From<TypeDescriptor> for Symbol {
    fn from(ty: TypeDescriptor) -> Self {
        Symbol::Type(ty)
    }
}

impl From<MemberDescriptor> for Symbol {
    fn from(member: MemberDescriptor) -> Self {
        Symbol::Member(member)
    }
}

/// What a report writer receives for each symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct DocumentedSymbol {
    pub identifier: String,
    pub kind: SymbolKind,
    /// Set when the entry documents one parameter of the member `identifier` names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    pub documentation: Option<String>,
}

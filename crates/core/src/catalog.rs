use crate::docid;
use crate::error::Result;
use crate::store::{DocumentationStore, parameter_fragment};
use memberdoc_api::SymbolTable;
use memberdoc_api::models::{DocumentedSymbol, Symbol};

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub interfaces_only: bool,
    /// Emit one extra entry per method/constructor parameter, right after its member.
    pub include_parameters: bool,
    pub skip_local_functions: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            interfaces_only: false,
            include_parameters: false,
            skip_local_functions: true,
        }
    }
}

/// Pair every exported symbol of `table` with its documentation, loading the
/// owner's documentation file first if it has not been attempted yet.
pub fn document_table(
    store: &DocumentationStore,
    table: &dyn SymbolTable,
    options: &CatalogOptions,
) -> Result<Vec<DocumentedSymbol>> {
    store.get_or_load_for_owner(table.owner())?;

    let mut out = Vec::new();
    for ty in table.exported_types() {
        if options.interfaces_only && !ty.is_interface {
            continue;
        }
        let members = table.members_of(&ty);
        out.push(describe(store, Symbol::Type(ty))?);

        for member in members {
            if options.skip_local_functions && docid::is_local_function(member.name()) {
                continue;
            }
            let parameters: Vec<String> = if options.include_parameters {
                member.parameters().iter().map(|p| p.name.clone()).collect()
            } else {
                Vec::new()
            };

            let entry = describe(store, Symbol::Member(member))?;
            let parameter_entries: Vec<DocumentedSymbol> = parameters
                .into_iter()
                .map(|name| DocumentedSymbol {
                    identifier: entry.identifier.clone(),
                    kind: entry.kind,
                    documentation: entry
                        .documentation
                        .as_deref()
                        .and_then(|doc| parameter_fragment(doc, &name)),
                    parameter: Some(name),
                })
                .collect();

            out.push(entry);
            out.extend(parameter_entries);
        }
    }

    tracing::debug!(
        "Catalogued {} symbols from {}",
        out.len(),
        table.owner().display()
    );
    Ok(out)
}

fn describe(store: &DocumentationStore, symbol: Symbol) -> Result<DocumentedSymbol> {
    let identifier = docid::symbol_id(&symbol)?;
    Ok(DocumentedSymbol {
        documentation: store.lookup(&identifier),
        kind: symbol.kind(),
        parameter: None,
        identifier,
    })
}

//! Canonical documentation identifiers.
//!
//! Every identifier is a kind prefix (`T:`, `M:`, `P:`, `F:`, `E:`) followed
//! by the qualified symbol name. Types referenced inside a method signature
//! are written in parameter form: arity suffixes dropped, generic arguments
//! listed in braces, generic parameters replaced by their positions.
//!
//! ```text
//! T:Sample.Box`1
//! M:Sample.Box`1.Map``1(System.Func{`0,``0})
//! M:Sample.Widget.#ctor(System.String)
//! M:Sample.Widget.op_Implicit(System.Int32)~Sample.Widget
//! P:Sample.Outer.Inner.Count
//! ```

mod generics;

pub use generics::{GenericContext, GenericParameterMap};

use crate::error::DocIdError;
use memberdoc_api::models::{
    ConstructorDescriptor, MemberDescriptor, MethodDescriptor, NamedMember, ParameterDescriptor,
    Symbol, SymbolKind, TypeDescriptor, TypeShape,
};
use once_cell::sync::Lazy;
use regex::Regex;

static ARITY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"`\d+").unwrap());
static ARGUMENT_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*\]").unwrap());
static LOCAL_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"g__.+\|\d+_\d+").unwrap());

/// How a type is being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMode {
    /// The type as the subject of its own identifier: arity kept, no arguments.
    Definition,
    /// The type inside a signature.
    Parameter,
}

/// Append the qualified name of `ty` to `out`.
pub fn write_type_name(
    out: &mut String,
    ty: &TypeDescriptor,
    mode: NameMode,
    ctx: &GenericContext,
) -> Result<(), DocIdError> {
    match &ty.shape {
        TypeShape::GenericParameter => {
            out.push_str(&ctx.reference(&ty.name)?);
        }
        TypeShape::Array { element, rank } => {
            write_type_name(out, element, mode, ctx)?;
            match *rank {
                0 => {
                    return Err(DocIdError::UnhandledElementType {
                        detail: format!("array of rank 0 over `{}`", element.name),
                    });
                }
                1 => out.push_str("[]"),
                n => {
                    out.push('[');
                    for i in 0..n {
                        if i > 0 {
                            out.push(',');
                        }
                        out.push_str("0:");
                    }
                    out.push(']');
                }
            }
        }
        TypeShape::Pointer { element } => {
            write_type_name(out, element, mode, ctx)?;
            out.push('*');
        }
        TypeShape::ByRef { element } => {
            write_type_name(out, element, mode, ctx)?;
            out.push('@');
        }
        TypeShape::Named {
            declaring,
            generic_parameters,
            generic_arguments,
        } => {
            match declaring {
                Some(outer) => {
                    write_type_name(out, outer, mode, ctx)?;
                    out.push('.');
                }
                None if !ty.namespace.is_empty() => {
                    out.push_str(&ty.namespace);
                    out.push('.');
                }
                None => {}
            }

            if mode == NameMode::Definition {
                out.push_str(&ty.name);
                return Ok(());
            }

            out.push_str(&ARITY_SUFFIX.replace_all(&ty.name, ""));
            if !generic_arguments.is_empty() {
                out.push('{');
                for (i, argument) in generic_arguments.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_type_name(out, argument, mode, ctx)?;
                }
                out.push('}');
            } else if !generic_parameters.is_empty() {
                // Open definition used as a parameter type.
                let references = generic_parameters
                    .iter()
                    .map(|name| ctx.reference(name))
                    .collect::<Result<Vec<_>, _>>()?;
                out.push('{');
                out.push_str(&references.join(","));
                out.push('}');
            }
        }
    }
    Ok(())
}

pub fn type_name(
    ty: &TypeDescriptor,
    mode: NameMode,
    ctx: &GenericContext,
) -> Result<String, DocIdError> {
    let mut out = String::new();
    write_type_name(&mut out, ty, mode, ctx)?;
    Ok(out)
}

/// `T:` identifier of a type definition.
pub fn type_id(ty: &TypeDescriptor) -> Result<String, DocIdError> {
    let ctx = GenericContext::for_type(ty);
    let mut id = String::from(SymbolKind::Type.prefix());
    write_type_name(&mut id, ty, NameMode::Definition, &ctx)?;
    Ok(id)
}

pub fn method_id(method: &MethodDescriptor) -> Result<String, DocIdError> {
    let ctx = GenericContext::for_method(method);
    let mut id = String::from(SymbolKind::Method.prefix());
    write_type_name(&mut id, &method.declaring, NameMode::Definition, &ctx)?;
    id.push('.');
    id.push_str(&method.name);
    if !method.generic_parameters.is_empty() {
        id.push_str("``");
        id.push_str(&method.generic_parameters.len().to_string());
    }
    write_parameter_list(&mut id, &method.parameters, &ctx)?;

    if method.is_conversion_operator() {
        let return_type = method.return_type.as_ref().ok_or_else(|| {
            DocIdError::MissingConversionType {
                method: method.name.clone(),
            }
        })?;
        id.push('~');
        write_type_name(&mut id, return_type, NameMode::Parameter, &ctx)?;
    }
    Ok(id)
}

pub fn constructor_id(constructor: &ConstructorDescriptor) -> Result<String, DocIdError> {
    let ctx = GenericContext::for_constructor(constructor);
    let mut id = String::from(SymbolKind::Method.prefix());
    write_type_name(&mut id, &constructor.declaring, NameMode::Definition, &ctx)?;
    id.push('.');
    id.push_str(ConstructorDescriptor::NAME);
    write_parameter_list(&mut id, &constructor.parameters, &ctx)?;
    Ok(id)
}

/// Nothing is written for an empty parameter list, not even `()`.
fn write_parameter_list(
    out: &mut String,
    parameters: &[ParameterDescriptor],
    ctx: &GenericContext,
) -> Result<(), DocIdError> {
    if parameters.is_empty() {
        return Ok(());
    }
    out.push('(');
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_type_name(out, &parameter.ty, NameMode::Parameter, ctx)?;
    }
    out.push(')');
    Ok(())
}

/// `P:`, `F:` and `E:` identifiers, built from the runtime full name of the
/// declaring type with argument brackets removed and `+` nesting turned into `.`.
pub fn named_member_id(kind: SymbolKind, member: &NamedMember) -> String {
    format!(
        "{}{}.{}",
        kind.prefix(),
        normalize_full_name(&member.declaring.full_name()),
        member.name
    )
}

pub fn normalize_full_name(full_name: &str) -> String {
    ARGUMENT_BRACKETS.replace_all(full_name, "").replace('+', ".")
}

pub fn member_id(member: &MemberDescriptor) -> Result<String, DocIdError> {
    match member {
        MemberDescriptor::Method(method) => method_id(method),
        MemberDescriptor::Constructor(constructor) => constructor_id(constructor),
        MemberDescriptor::Property(m) => Ok(named_member_id(SymbolKind::Property, m)),
        MemberDescriptor::Field(m) => Ok(named_member_id(SymbolKind::Field, m)),
        MemberDescriptor::Event(m) => Ok(named_member_id(SymbolKind::Event, m)),
    }
}

pub fn symbol_id(symbol: &Symbol) -> Result<String, DocIdError> {
    match symbol {
        Symbol::Type(ty) => type_id(ty),
        Symbol::Member(member) => member_id(member),
    }
}

/// Compiler-generated local functions (`<Outer>g__Inner|0_0`) carry no documentation.
pub fn is_local_function(name: &str) -> bool {
    LOCAL_FUNCTION.is_match(name)
}

//! Tests for the documentation store

use memberdoc_api::models::{
    ConstructorDescriptor, MemberDescriptor, MethodDescriptor, NamedMember, Symbol, TypeDescriptor,
};
use memberdoc_core::{DocumentationStore, MemberdocError, StoreConfig, StoreError};
use std::path::Path;
use tempfile::TempDir;

const WIDGET_DOC: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>Sample</name>
    </assembly>
    <members>
        <member name="T:Sample.Widget">
            <summary>A resizable widget.</summary>
        </member>
        <member name="M:Sample.Widget.Resize(System.Int32,System.Int32)">
            <summary>Resizes it.</summary>
            <param name="width">New width.</param>
            <param name="height">New height.</param>
            <returns>Whether the size changed.</returns>
        </member>
        <member name="M:Sample.Widget.#ctor(System.String)">
            <summary>Creates a labelled widget.</summary>
        </member>
        <member name="P:Sample.Widget.Size">
            <summary>Current size.</summary>
        </member>
    </members>
</doc>
"#;

fn widget() -> TypeDescriptor {
    TypeDescriptor::named("Sample", "Widget")
}

fn resize() -> MemberDescriptor {
    let int = TypeDescriptor::named("System", "Int32");
    MemberDescriptor::Method(
        MethodDescriptor::new(widget(), "Resize")
            .with_parameter("width", int.clone())
            .with_parameter("height", int)
            .returning(TypeDescriptor::named("System", "Boolean")),
    )
}

fn write_source(dir: &Path, file: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_load_and_lookup_method() {
    let temp = TempDir::new().unwrap();
    let path = write_source(temp.path(), "Sample.xml", WIDGET_DOC);

    let store = DocumentationStore::default();
    store.load(&path).unwrap();

    let doc = store
        .lookup("M:Sample.Widget.Resize(System.Int32,System.Int32)")
        .unwrap();
    assert!(doc.contains("Resizes it."));

    let via_descriptor = store.member_documentation(&resize()).unwrap().unwrap();
    assert_eq!(doc, via_descriptor);
}

#[test]
fn test_lookup_miss_is_none() {
    let store = DocumentationStore::default();
    store.load_str("sample", WIDGET_DOC).unwrap();

    assert_eq!(store.lookup("T:Sample.Gadget"), None);
    let field = Symbol::from(MemberDescriptor::Field(NamedMember::new(widget(), "count")));
    assert_eq!(store.documentation(&field).unwrap(), None);
}

#[test]
fn test_dispatch_over_symbol_kinds() {
    let store = DocumentationStore::default();
    store.load_str("sample", WIDGET_DOC).unwrap();

    let ty = store.documentation(&Symbol::from(widget())).unwrap().unwrap();
    assert!(ty.contains("A resizable widget."));

    let ctor = MemberDescriptor::Constructor(
        ConstructorDescriptor::new(widget())
            .with_parameter("label", TypeDescriptor::named("System", "String")),
    );
    let ctor_doc = store.documentation(&Symbol::from(ctor)).unwrap().unwrap();
    assert!(ctor_doc.contains("Creates a labelled widget."));

    let size = MemberDescriptor::Property(NamedMember::new(widget(), "Size"));
    let size_doc = store.documentation(&Symbol::from(size)).unwrap().unwrap();
    assert!(size_doc.contains("Current size."));
}

#[test]
fn test_parameter_documentation() {
    let store = DocumentationStore::default();
    store.load_str("sample", WIDGET_DOC).unwrap();

    assert_eq!(
        store.parameter_documentation(&resize(), "height").unwrap().as_deref(),
        Some(r#"<param name="height">New height.</param>"#)
    );
    assert_eq!(store.parameter_documentation(&resize(), "depth").unwrap(), None);

    let undocumented = MemberDescriptor::Method(
        MethodDescriptor::new(widget(), "Hide")
            .with_parameter("fade", TypeDescriptor::named("System", "Boolean")),
    );
    assert_eq!(store.parameter_documentation(&undocumented, "fade").unwrap(), None);
}

#[test]
fn test_loading_twice_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = write_source(temp.path(), "Sample.xml", WIDGET_DOC);

    let store = DocumentationStore::default();
    store.load(&path).unwrap();
    let first: Vec<_> = ["T:Sample.Widget", "P:Sample.Widget.Size"]
        .iter()
        .map(|id| store.lookup(id))
        .collect();
    let len = store.len();

    // A rewrite after the first load is not picked up: the source is already consumed.
    std::fs::write(&path, r#"<member name="T:Sample.Widget">changed</member>"#).unwrap();
    store.load(&path).unwrap();

    let second: Vec<_> = ["T:Sample.Widget", "P:Sample.Widget.Size"]
        .iter()
        .map(|id| store.lookup(id))
        .collect();
    assert_eq!(store.len(), len);
    assert_eq!(first, second);
    assert_eq!(store.parses_performed(), 1);
    assert!(store.is_loaded(&path.to_string_lossy()));
}

#[test]
fn test_equivalent_paths_share_one_load() {
    let temp = TempDir::new().unwrap();
    let path = write_source(temp.path(), "Sample.xml", WIDGET_DOC);
    let dotted = temp.path().join(".").join("Sample.xml");

    let store = DocumentationStore::default();
    store.load(&path).unwrap();
    store.load(&dotted).unwrap();

    assert_eq!(store.parses_performed(), 1);
    assert!(store.is_loaded(&dotted.to_string_lossy()));
}

#[test]
fn test_missing_source() {
    let temp = TempDir::new().unwrap();
    let store = DocumentationStore::default();

    let err = store.load(temp.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, StoreError::MissingSource { .. }));
    assert!(store.is_empty());
}

#[test]
fn test_malformed_source_inserts_nothing() {
    let text = r#"<doc><members>
        <member name="T:Sample.Good"><summary>Fine.</summary></member>
        <member><summary>No name.</summary></member>
    </members></doc>"#;

    let store = DocumentationStore::default();
    let err = store.load_str("half", text).unwrap_err();

    match err {
        StoreError::MalformedSource { source_name, line, .. } => {
            assert_eq!(source_name, "half");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty());
    assert_eq!(store.lookup("T:Sample.Good"), None);
    assert!(!store.is_loaded("half"));
}

#[test]
fn test_malformed_source_can_be_retried_after_fix() {
    let temp = TempDir::new().unwrap();
    let path = write_source(
        temp.path(),
        "Sample.xml",
        "<doc><member name=\"T:A\">unclosed</doc>",
    );

    let store = DocumentationStore::default();
    assert!(store.load(&path).is_err());

    std::fs::write(&path, "<doc><member name=\"T:A\">closed</member></doc>").unwrap();
    store.load(&path).unwrap();
    assert_eq!(store.lookup("T:A").as_deref(), Some("closed"));
}

#[test]
fn test_clear_resets_everything() {
    let temp = TempDir::new().unwrap();
    let path = write_source(temp.path(), "Sample.xml", WIDGET_DOC);

    let store = DocumentationStore::default();
    store.load(&path).unwrap();
    assert!(!store.is_empty());

    store.clear();
    assert!(store.is_empty());
    assert!(!store.is_loaded(&path.to_string_lossy()));

    store.load(&path).unwrap();
    assert!(store.contains("T:Sample.Widget"));
}

#[test]
fn test_owner_load_uses_sibling_file() {
    let temp = TempDir::new().unwrap();
    let owner = temp.path().join("Sample.dll");
    std::fs::write(&owner, b"not a real image").unwrap();
    write_source(temp.path(), "Sample.xml", WIDGET_DOC);

    let store = DocumentationStore::default();
    let doc = store
        .documentation_for_owner(&owner, &Symbol::from(resize()))
        .unwrap()
        .unwrap();
    assert!(doc.contains("Resizes it."));
}

#[test]
fn test_owner_without_documentation_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let owner = temp.path().join("Bare.dll");

    let store = DocumentationStore::default();
    store.get_or_load_for_owner(&owner).unwrap();
    assert!(store.is_empty());

    // Already attempted: a file appearing later is not picked up for this owner.
    write_source(temp.path(), "Bare.xml", WIDGET_DOC);
    store.get_or_load_for_owner(&owner).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_malformed_owner_source_is_lenient_by_default() {
    let temp = TempDir::new().unwrap();
    let owner = temp.path().join("Broken.dll");
    write_source(temp.path(), "Broken.xml", "<doc><member name=\"T:A\">");

    let store = DocumentationStore::default();
    let doc = store
        .documentation_for_owner(&owner, &Symbol::from(widget()))
        .unwrap();
    assert_eq!(doc, None);
    assert!(store.is_empty());
}

fn write_utf16_source(dir: &Path, file: &str, text: &str) {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    std::fs::write(dir.join(file), bytes).unwrap();
}

#[test]
fn test_undecodable_owner_source_is_lenient_by_default() {
    let temp = TempDir::new().unwrap();
    let owner = temp.path().join("Sample.dll");
    write_utf16_source(temp.path(), "Sample.xml", "<doc/>");

    let store = DocumentationStore::default();
    store.get_or_load_for_owner(&owner).unwrap();
    let doc = store
        .documentation_for_owner(&owner, &Symbol::from(widget()))
        .unwrap();
    assert_eq!(doc, None);

    // Recorded as attempted, so nothing was ingested and later calls stay quiet.
    assert_eq!(store.parses_performed(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_undecodable_source_is_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Sample.xml");
    std::fs::write(&path, b"<doc>\n<member name=\"T:A\">\xFF</member></doc>").unwrap();

    let store = DocumentationStore::default();
    match store.load(&path).unwrap_err() {
        StoreError::MalformedSource { line, reason, .. } => {
            assert_eq!(line, 2);
            assert!(reason.contains("UTF-8"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!store.is_loaded(&path.to_string_lossy()));
}

#[test]
fn test_malformed_owner_source_in_strict_mode() {
    let temp = TempDir::new().unwrap();
    let owner = temp.path().join("Broken.dll");
    write_source(temp.path(), "Broken.xml", "<doc><member name=\"T:A\">");

    let store = DocumentationStore::new(StoreConfig {
        strict_owner_sources: true,
        ..StoreConfig::default()
    });
    let err = store
        .documentation_for_owner(&owner, &Symbol::from(widget()))
        .unwrap_err();
    assert!(matches!(
        err,
        MemberdocError::Store(StoreError::MalformedSource { .. })
    ));

    // The owner stays unattempted, so the error is reported again.
    assert!(store.get_or_load_for_owner(&owner).is_err());
}

#[test]
fn test_custom_documentation_extension() {
    let temp = TempDir::new().unwrap();
    let owner = temp.path().join("Sample.dll");
    write_source(temp.path(), "Sample.doc", WIDGET_DOC);

    let store = DocumentationStore::new(StoreConfig {
        documentation_extension: "doc".to_string(),
        ..StoreConfig::default()
    });
    store.get_or_load_for_owner(&owner).unwrap();
    assert!(store.contains("T:Sample.Widget"));
}

#[test]
fn test_concurrent_loads_parse_once() {
    let temp = TempDir::new().unwrap();
    let path = write_source(temp.path(), "Sample.xml", WIDGET_DOC);
    let owner = temp.path().join("Sample.dll");

    let store = DocumentationStore::default();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let store = &store;
            let path = &path;
            let owner = &owner;
            scope.spawn(move || {
                if i % 2 == 0 {
                    store.load(path).unwrap();
                } else {
                    store.get_or_load_for_owner(owner).unwrap();
                }
                assert!(store.lookup("T:Sample.Widget").is_some());
            });
        }
    });

    assert_eq!(store.len(), 4);
    assert_eq!(store.parses_performed(), 1);
    assert!(store.is_loaded(&path.to_string_lossy()));
}

#[test]
fn test_global_store_is_shared() {
    let a = DocumentationStore::global();
    let b = DocumentationStore::global();
    assert!(std::ptr::eq(a, b));

    a.load_str("global-test", r#"<member name="T:Global.Marker">marker</member>"#)
        .unwrap();
    assert_eq!(b.lookup("T:Global.Marker").as_deref(), Some("marker"));
}

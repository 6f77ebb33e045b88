//! Integration tests for editor crate

use std::fs;

use scalpel_editor::{Document, EditorError, Mutation};

const SOURCE: &str = r#"<section data-eid="root">
  <h1 data-eid="title">Hello</h1>
</section>
"#;

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("page.html");
    fs::write(&path, SOURCE)?;

    let mut doc = Document::load(&path)?;
    assert_eq!(doc.version, 0);
    assert!(!doc.is_dirty());
    assert_eq!(doc.path(), Some(path.as_path()));

    doc.apply(&Mutation::UpdateText {
        element_id: "title".to_string(),
        text: "Goodbye".to_string(),
        old_text: None,
    });
    assert!(doc.is_dirty());

    doc.save()?;
    assert!(!doc.is_dirty());
    assert_eq!(
        fs::read_to_string(&path)?,
        "<section data-eid=\"root\">\n  <h1 data-eid=\"title\">Goodbye</h1>\n</section>\n"
    );

    Ok(())
}

#[test]
fn test_undo_marks_dirty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("page.html");
    fs::write(&path, SOURCE)?;

    let mut doc = Document::load(&path)?;
    doc.apply(&Mutation::RemoveElement {
        element_id: "title".to_string(),
    });
    doc.save()?;

    assert!(doc.undo());
    assert!(doc.is_dirty());
    doc.save()?;
    assert_eq!(fs::read_to_string(&path)?, SOURCE);

    Ok(())
}

#[test]
fn test_load_missing_file() {
    let result = Document::load("/definitely/not/here.html");
    assert!(matches!(result, Err(EditorError::Io(_))));
}

#[test]
fn test_script_applies_as_one_step() -> anyhow::Result<()> {
    let script = r#"[
        {"InsertAfter": {"element_id": "title", "markup": "<p data-eid=\"lead\">Intro</p>"}},
        {"SetInlineStyle": {"element_id": "lead", "property": "color", "value": "gray"}}
    ]"#;

    let mutations = Mutation::parse_script(script)?;
    let mut doc = Document::from_source(SOURCE);
    doc.apply_all(&mutations, Some("Add lead"));

    assert_eq!(
        doc.source(),
        "<section data-eid=\"root\">\n  <h1 data-eid=\"title\">Hello</h1>\n  <p data-eid=\"lead\" style=\"color: gray\">Intro</p>\n</section>\n"
    );
    assert_eq!(doc.find_siblings("lead").previous_id, Some("title"));

    doc.undo();
    assert_eq!(doc.source(), SOURCE);
    Ok(())
}

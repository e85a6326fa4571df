use std::fs;

use artifacts::{list_outputs, package_outputs, read_document, FsArtifactWriter};
use pipeline::{ArtifactWriter, DocGenError};

#[test]
fn creates_missing_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("a/b/c/brd_prd.md");

    let written = FsArtifactWriter::new().write(&target, "hello", false).unwrap();

    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
}

#[test]
fn non_overwrite_redirects_to_new_suffix_and_keeps_original() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("brd_prd.md");
    let writer = FsArtifactWriter::new();

    let first = writer.write(&target, "first", false).unwrap();
    let second = writer.write(&target, "second", false).unwrap();
    let third = writer.write(&target, "third", false).unwrap();

    assert_eq!(first, target);
    assert_eq!(second, tmp.path().join("brd_prd.md.new"));
    assert_eq!(third, second);
    assert_eq!(fs::read_to_string(&target).unwrap(), "first");
    assert_eq!(fs::read_to_string(&second).unwrap(), "third");
    assert_eq!(
        list_outputs(tmp.path()).unwrap(),
        vec!["brd_prd.md", "brd_prd.md.new"]
    );
}

#[test]
fn overwrite_replaces_in_place() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("openapi.yaml");
    let writer = FsArtifactWriter::new();

    writer.write(&target, "v1", true).unwrap();
    let written = writer.write(&target, "v2", true).unwrap();

    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "v2");
    assert_eq!(list_outputs(tmp.path()).unwrap(), vec!["openapi.yaml"]);
}

#[test]
fn write_into_a_file_path_fails_with_write_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let err = FsArtifactWriter::new()
        .write(&blocker.join("srd.md"), "text", false)
        .unwrap_err();
    assert!(matches!(err, DocGenError::Write { .. }));
}

#[test]
fn listing_is_recursive_and_relative() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("nested")).unwrap();
    fs::write(tmp.path().join("nested/erd.mmd"), "erDiagram").unwrap();
    fs::write(tmp.path().join("frd.md"), "# FRD").unwrap();

    assert_eq!(
        list_outputs(tmp.path()).unwrap(),
        vec!["frd.md", "nested/erd.mmd"]
    );
    assert!(list_outputs(&tmp.path().join("missing")).unwrap().is_empty());
}

#[test]
fn show_returns_content_or_none() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("frd.md"), "# FRD").unwrap();

    assert_eq!(
        read_document(tmp.path(), "frd.md").unwrap().as_deref(),
        Some("# FRD")
    );
    assert_eq!(read_document(tmp.path(), "srd.md").unwrap(), None);
    assert_eq!(read_document(tmp.path(), "../frd.md").unwrap(), None);
}

#[test]
fn packaging_writes_an_archive_with_every_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("outputs");
    fs::create_dir_all(out.join("nested")).unwrap();
    fs::write(out.join("brd_prd.md"), "# BRD").unwrap();
    fs::write(out.join("nested/erd.mmd"), "erDiagram").unwrap();

    let archive = tmp.path().join("docs_outputs.zip");
    let written = package_outputs(&out, &archive).unwrap();

    assert_eq!(written, archive);
    let bytes = fs::read(&archive).unwrap();
    assert!(bytes.starts_with(b"PK"));
    let raw = String::from_utf8_lossy(&bytes);
    assert!(raw.contains("brd_prd.md"));
    assert!(raw.contains("nested/erd.mmd"));
}

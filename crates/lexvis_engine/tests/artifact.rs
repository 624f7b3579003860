use std::fs;
use std::path::Path;

use lexvis_engine::{load_grammar_artifact, media_type_for, ArtifactError};

#[test]
fn loads_bytes_name_and_media_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Hello.g4");
    fs::write(&path, b"lexer grammar Hello;\n").unwrap();

    let artifact = load_grammar_artifact(&path).expect("artifact");
    assert_eq!(artifact.name(), "Hello.g4");
    assert_eq!(artifact.media_type(), "text/plain");
    assert_eq!(artifact.bytes(), b"lexer grammar Hello;\n");
    assert_eq!(artifact.size(), 21);
}

#[test]
fn binary_content_is_accepted_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.bin");
    fs::write(&path, [0u8, 159, 146, 150]).unwrap();

    let artifact = load_grammar_artifact(&path).expect("artifact");
    assert_eq!(artifact.bytes(), &[0u8, 159, 146, 150]);
    assert_eq!(artifact.media_type(), "application/octet-stream");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_grammar_artifact(&dir.path().join("nope.g4")).unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[test]
fn directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_grammar_artifact(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::NotAFile { .. }));
}

#[test]
fn media_type_is_case_insensitive() {
    assert_eq!(media_type_for(Path::new("A.G4")), "text/plain");
    assert_eq!(media_type_for(Path::new("rules.json")), "application/json");
    assert_eq!(media_type_for(Path::new("noext")), "application/octet-stream");
}

/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use lyricdeck::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "song.txt", "Line")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/song.txt");
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "deck", "json");

    assert_eq!(output_path, Path::new("/tmp/output/song.deck.json"));
}

/// Test that dir_exists distinguishes directories from missing paths
#[test]
fn test_dir_exists_withExistingAndMissingDirs_shouldAnswerCorrectly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(temp_dir.path().join("missing")));

    Ok(())
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(nested.is_dir());
    Ok(())
}

/// Test that write_to_file creates parent directories and read_to_string returns the content
#[test]
fn test_write_to_file_withMissingParent_shouldCreateItAndWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("song.deck.json");

    FileManager::write_to_file(&path, "{}")?;

    assert_eq!(FileManager::read_to_string(&path)?, "{}");
    Ok(())
}

/// Test that read_to_string reports missing files
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("definitely_missing_file.txt").is_err());
}

/// Test that find_files walks subdirectories and filters by extension
#[test]
fn test_find_files_withNestedDirs_shouldReturnMatchingFilesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    fs::create_dir(root.join("nested"))?;
    common::create_test_file(&root, "b.txt", "B")?;
    common::create_test_file(&root, "a.TXT", "A")?;
    common::create_test_file(&root, "notes.md", "N")?;
    common::create_test_file(&root.join("nested"), "c.txt", "C")?;

    let files = FileManager::find_files(&root, ".txt")?;
    let names: Vec<String> = files
        .iter()
        .map(|path| path.strip_prefix(&root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.TXT", "b.txt", "nested/c.txt"]);
    Ok(())
}

/// Test that append_to_log_file keeps earlier entries
#[test]
fn test_append_to_log_file_calledTwice_shouldKeepBothEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("lyricdeck.issues.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}

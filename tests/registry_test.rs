use breedlens::{ClassifierError, LabelRegistry};
use std::env;
use std::fs;

#[test]
fn test_load_matches_index_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env::temp_dir().join("breedlens-registry-test");
    fs::create_dir_all(&dir)?;
    let path = dir.join("class_names.txt");
    fs::write(&path, "Ayrshire\nDangi\n\nKangayam\nAmritmahal\n")?;

    let registry = LabelRegistry::load(&path)?;

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.name_of(2), "Kangayam");
    assert_eq!(registry.name_of(3), "Amritmahal");
    assert_eq!(registry.name_of(4), "Class_4");
    Ok(())
}

#[test]
fn test_blank_file_is_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env::temp_dir().join("breedlens-registry-test");
    fs::create_dir_all(&dir)?;
    let path = dir.join("blank.txt");
    fs::write(&path, "\n \n\t\n")?;

    let result = LabelRegistry::load(&path);

    assert!(matches!(result, Err(ClassifierError::RegistryUnavailable(_))));
    Ok(())
}

#[test]
fn test_missing_file_is_unavailable() {
    let result = LabelRegistry::load(env::temp_dir().join("breedlens-does-not-exist.txt"));
    assert!(matches!(result, Err(ClassifierError::RegistryUnavailable(_))));
}

//! Copying user-chosen images into the vault.
//!
//! Images are copied, never moved or decoded. Each copy gets a random hex
//! prefix so two files called `front.jpg` never overwrite each other. When
//! the images directory lies under the vault root (`..` steps allowed) the
//! record stores the path relative to the vault root with `/` separators, so
//! a vault directory can be moved as a whole. An absolute images directory
//! elsewhere is stored as an absolute path. Either way
//! `vault_root.join(stored)` names the copy.

use crate::error::{Result, VaultError};
use std::fs;
use std::path::{Component, Path};
use uuid::Uuid;

/// Copy `source` into `<vault_root>/<images_dir>/` and return the stored
/// relative path.
pub fn import_image(vault_root: &Path, images_dir: &str, source: &Path) -> Result<String> {
    if !source.is_file() {
        return Err(VaultError::Validation(format!(
            "Image not found or not a file: {}",
            source.display()
        )));
    }

    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            VaultError::Validation(format!("Unusable image file name: {}", source.display()))
        })?;

    let target_dir = vault_root.join(images_dir);
    fs::create_dir_all(&target_dir)?;

    let unique_name = format!("{}_{}", Uuid::new_v4().simple(), file_name);
    let target = target_dir.join(&unique_name);
    fs::copy(source, &target)?;
    log::debug!("Copied {} to {}", source.display(), target.display());

    Ok(stored_path(vault_root, &target))
}

/// Remove copies made by [`import_image`], given the stored paths.
pub fn discard_images(vault_root: &Path, stored: &[String]) {
    for path in stored {
        let full = vault_root.join(path);
        if let Err(e) = fs::remove_file(&full) {
            log::warn!("Could not remove {}: {}", full.display(), e);
        }
    }
}

fn stored_path(vault_root: &Path, target: &Path) -> String {
    match target.strip_prefix(vault_root) {
        Ok(relative) => relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => target.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_under_a_unique_name() {
        let vault = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let source = outside.path().join("front.jpg");
        fs::write(&source, b"not really a jpeg").unwrap();

        let first = import_image(vault.path(), "assets/coin_images", &source).unwrap();
        let second = import_image(vault.path(), "assets/coin_images", &source).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("assets/coin_images/"));
        assert!(first.ends_with("_front.jpg"));
        let copied = fs::read(vault.path().join(&first)).unwrap();
        assert_eq!(copied, b"not really a jpeg");
        assert!(source.exists());
    }

    #[test]
    fn images_dir_outside_the_vault_resolves_from_the_root() {
        let base = tempfile::tempdir().unwrap();
        let vault = base.path().join("vault");
        fs::create_dir_all(&vault).unwrap();
        let source = base.path().join("front.jpg");
        fs::write(&source, b"jpeg").unwrap();

        let stored = import_image(&vault, "../shared", &source).unwrap();
        assert!(stored.starts_with("../shared/"));
        assert!(vault.join(&stored).exists());
        assert!(base.path().join("shared").is_dir());

        let elsewhere = tempfile::tempdir().unwrap();
        let absolute = elsewhere.path().to_str().unwrap().to_string();
        let stored = import_image(&vault, &absolute, &source).unwrap();
        assert!(Path::new(&stored).is_absolute());
        assert!(vault.join(&stored).exists());
        assert!(Path::new(&stored).starts_with(elsewhere.path()));
    }

    #[test]
    fn discard_removes_copies() {
        let vault = tempfile::tempdir().unwrap();
        let source = vault.path().join("front.jpg");
        fs::write(&source, b"jpeg").unwrap();

        let stored = import_image(vault.path(), "images", &source).unwrap();
        discard_images(vault.path(), std::slice::from_ref(&stored));
        assert!(!vault.path().join(&stored).exists());
        assert!(source.exists());
    }

    #[test]
    fn rejects_missing_sources() {
        let vault = tempfile::tempdir().unwrap();
        let missing = vault.path().join("nope.png");
        let err = import_image(vault.path(), "images", &missing).unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));

        let err = import_image(vault.path(), "images", vault.path()).unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
    }
}

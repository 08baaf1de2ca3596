//! On-disk profile store.
//!
//! One MessagePack file per profile under a single directory, named
//! `<sanitized-name>.vcp`. Writes go to a temp file in the same directory
//! followed by an atomic rename, so concurrent readers never observe a
//! partially written profile. Concurrent writes to the *same* name are the
//! caller's responsibility to serialize.

use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::profile::{FORMAT_VERSION, VoiceProfile};

/// File extension for stored profiles.
const PROFILE_EXT: &str = "vcp";

/// Maximum length of a sanitized voice name.
const MAX_NAME_LEN: usize = 255;

/// Durable store for [`VoiceProfile`]s, keyed by sanitized voice name.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes a profile, overwriting any existing profile with the same
    /// sanitized name. Callers confirm overwrite intent upstream.
    pub fn put(&self, profile: &VoiceProfile) -> Result<(), ProfileError> {
        let path = self.path_for(&profile.name)?;
        let bytes = rmp_serde::to_vec_named(profile)
            .map_err(|e| ProfileError::Encode(e.to_string()))?;

        let tmp = path.with_extension("vcp.tmp");
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Loads a profile by name.
    pub fn get(&self, name: &str) -> Result<VoiceProfile, ProfileError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(ProfileError::NotFound {
                name: name.to_string(),
            });
        }

        let bytes = std::fs::read(&path)?;
        let profile: VoiceProfile =
            rmp_serde::from_slice(&bytes).map_err(|e| ProfileError::Corrupt {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        if profile.format_version != FORMAT_VERSION {
            return Err(ProfileError::Corrupt {
                name: name.to_string(),
                reason: format!("unsupported format version {:?}", profile.format_version),
            });
        }
        Ok(profile)
    }

    /// Returns the sorted names of all stored profiles.
    pub fn list(&self) -> Result<Vec<String>, ProfileError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Deletes a profile. Ok when the profile does not exist.
    pub fn delete(&self, name: &str) -> Result<(), ProfileError> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ProfileError> {
        let safe = sanitize_name(name)?;
        Ok(self.dir.join(format!("{safe}.{PROFILE_EXT}")))
    }
}

/// Strips characters illegal in file names, trims leading/trailing dots and
/// underscores, and truncates to 255 characters. Fails when nothing is left.
pub fn sanitize_name(name: &str) -> Result<String, ProfileError> {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim_matches(['.', '_']);
    let sanitized: String = trimmed.chars().take(MAX_NAME_LEN).collect();
    if sanitized.is_empty() {
        return Err(ProfileError::InvalidName(name.to_string()));
    }
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("voices")).unwrap();
        (dir, store)
    }

    #[test]
    fn put_get_roundtrip_is_exact() {
        let (_dir, store) = store();
        let embedding: Vec<f32> = (0..512).map(|i| (i as f32 * 0.371).sin()).collect();
        let profile = VoiceProfile::new("alice", embedding);

        store.put(&profile).unwrap();
        let loaded = store.get("alice").unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn get_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.get("ghost").unwrap_err();
        assert!(matches!(err, ProfileError::NotFound { .. }));
    }

    #[test]
    fn put_overwrites_existing() {
        let (_dir, store) = store();
        store.put(&VoiceProfile::new("bob", vec![1.0])).unwrap();
        store.put(&VoiceProfile::new("bob", vec![2.0, 3.0])).unwrap();

        let loaded = store.get("bob").unwrap();
        assert_eq!(loaded.embedding, vec![2.0, 3.0]);
        assert_eq!(store.list().unwrap(), vec!["bob"]);
    }

    #[test]
    fn corrupt_bytes_are_reported() {
        let (_dir, store) = store();
        std::fs::write(store.dir().join("mangled.vcp"), b"not msgpack").unwrap();

        let err = store.get("mangled").unwrap_err();
        assert!(matches!(err, ProfileError::Corrupt { .. }));
    }

    #[test]
    fn version_mismatch_is_corrupt() {
        let (_dir, store) = store();
        let mut profile = VoiceProfile::new("future", vec![0.5]);
        profile.format_version = "9.9".to_string();
        store.put(&profile).unwrap();

        let err = store.get("future").unwrap_err();
        match err {
            ProfileError::Corrupt { reason, .. } => assert!(reason.contains("9.9")),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn delete_is_idempotent() {
        let (_dir, store) = store();
        store.put(&VoiceProfile::new("carol", vec![0.1])).unwrap();

        store.delete("carol").unwrap();
        store.delete("carol").unwrap();
        assert!(!store.list().unwrap().contains(&"carol".to_string()));
    }

    #[test]
    fn list_is_sorted() {
        let (_dir, store) = store();
        for name in ["zeta", "alpha", "mid"] {
            store.put(&VoiceProfile::new(name, vec![0.0])).unwrap();
        }
        assert_eq!(store.list().unwrap(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn no_partial_files_left_behind() {
        let (_dir, store) = store();
        store.put(&VoiceProfile::new("dave", vec![0.2])).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_name("my/voice: v1?").unwrap(), "my_voice_ v1");
        assert_eq!(sanitize_name("a<b>c").unwrap(), "a_b_c");
    }

    #[test]
    fn sanitize_trims_dots_and_underscores() {
        assert_eq!(sanitize_name("..hidden_.").unwrap(), "hidden");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_name(&long).unwrap().len(), 255);
    }

    #[test]
    fn sanitize_rejects_empty_results() {
        assert!(matches!(
            sanitize_name("..."),
            Err(ProfileError::InvalidName(_))
        ));
        assert!(matches!(
            sanitize_name(""),
            Err(ProfileError::InvalidName(_))
        ));
    }
}

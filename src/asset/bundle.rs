//! Bundle cache keys and artifact writing.
//!
//! A bundle is named after a blake3 fingerprint of the newest source mtime
//! and the ordered alias → path mapping, so any touched source or changed
//! alias set yields a new file name. Stale bundles are never deleted here.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::ResolvedAssets;

/// Hex characters of the fingerprint used in bundle file names.
pub const CACHE_KEY_LEN: usize = 32;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Bundle file stem: the first [`CACHE_KEY_LEN`] hex characters.
    pub fn cache_key(self) -> String {
        hex::encode(&self.0[..CACHE_KEY_LEN / 2])
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        f.write_str(&hex::encode(&self.0[..8]))
    }
}

#[derive(Serialize)]
struct Mtime {
    secs: u64,
    nanos: u32,
}

#[derive(Serialize)]
struct Fingerprint<'a> {
    mtime: Mtime,
    files: &'a ResolvedAssets,
}

/// Fingerprint of `{mtime, files}` serialized as JSON in resolution order.
pub fn fingerprint(
    max_mtime: Option<SystemTime>,
    files: &ResolvedAssets,
) -> serde_json::Result<ContentHash> {
    let since_epoch = max_mtime
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .unwrap_or_default();
    let fingerprint = Fingerprint {
        mtime: Mtime {
            secs: since_epoch.as_secs(),
            nanos: since_epoch.subsec_nanos(),
        },
        files,
    };

    let mut hasher = blake3::Hasher::new();
    serde_json::to_writer(&mut hasher, &fingerprint)?;
    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

/// Fail early if no file can be created in `dir`.
pub fn ensure_writable(dir: &Path) -> io::Result<()> {
    tempfile::Builder::new()
        .prefix(".bundle-")
        .tempfile_in(dir)
        .map(drop)
}

/// Write `content` to `dest` atomically.
///
/// The bytes go to a temp file in the destination directory which is then
/// renamed into place, so readers never see a partial bundle. Losing a
/// rename race to another writer is fine: inputs were identical, and so is
/// the content already at `dest`.
pub fn write_artifact(dest: &Path, content: &[u8]) -> io::Result<()> {
    let dir = dest
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "bundle path has no parent"))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".bundle-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;

    // Temp files are created owner-only; bundles are served by the web server.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    match tmp.persist(dest) {
        Ok(_) => Ok(()),
        Err(_) if dest.is_file() => Ok(()),
        Err(e) => Err(e.error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn assets(entries: &[(&str, &str)]) -> ResolvedAssets {
        let mut assets = ResolvedAssets::default();
        for (alias, path) in entries {
            assets.push(alias, path.to_string());
        }
        assets
    }

    #[test]
    fn test_content_hash_display() {
        let hash = ContentHash::new([0xab; 32]);
        assert_eq!(format!("{}", hash), "abababababababab");
        assert_eq!(hash.cache_key().len(), CACHE_KEY_LEN);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let files = assets(&[("bs", "assets/css/bs.css"), ("style", "assets/css/style.css")]);
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(
            fingerprint(Some(t), &files).unwrap(),
            fingerprint(Some(t), &files).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_sensitivity() {
        let files = assets(&[("bs", "assets/css/bs.css"), ("style", "assets/css/style.css")]);
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let base = fingerprint(Some(t), &files).unwrap();

        // newer mtime
        let later = t + Duration::from_secs(1);
        assert_ne!(base, fingerprint(Some(later), &files).unwrap());

        // order matters
        let reordered = assets(&[("style", "assets/css/style.css"), ("bs", "assets/css/bs.css")]);
        assert_ne!(base, fingerprint(Some(t), &reordered).unwrap());

        // resolved path matters (e.g. a different {LANG})
        let other = assets(&[("bs", "assets/css/bs.css"), ("style", "assets/css/style-fr.css")]);
        assert_ne!(base, fingerprint(Some(t), &other).unwrap());
    }

    #[test]
    fn test_write_artifact() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("abc.css");

        write_artifact(&dest, b"body{}").unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"body{}");

        // Second identical write replaces in place
        write_artifact(&dest, b"body{}").unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"body{}");

        // No temp files left behind
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["abc.css"]);
    }

    #[test]
    fn test_ensure_writable() {
        let dir = TempDir::new().unwrap();
        ensure_writable(dir.path()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(ensure_writable(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_write_artifact_onto_directory() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("abc.css");
        fs::create_dir(&dest).unwrap();
        assert!(write_artifact(&dest, b"x").is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_artifact_missing_dir() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing/abc.css");
        assert!(write_artifact(&dest, b"x").is_err());
    }
}

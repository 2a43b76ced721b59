// ============================================================================
// kako-core/src/external/locator.rs
// ============================================================================
//
// DECODER LOCATOR: Materializing the Bundled ffmpeg Binary
//
// The bundled ffmpeg is written once to the user cache directory under a
// content-addressed name, `<cache>/kako/bin/<sha256[..16]>-<name>`, and
// reused on later runs. Installation writes to a temporary sibling and
// renames it into place, so a partially written binary is never executed.

use crate::config::{APP_NAMESPACE, HASH_PREFIX_LEN};
use crate::error::{CoreError, CoreResult};
use crate::external::embedded::{self, DecoderPayload};

use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, PersistError};

/// Resolves the bundled decoder for the running platform into the user cache.
pub fn locate_decoder() -> CoreResult<PathBuf> {
    let payload = embedded::current_payload().ok_or_else(unsupported_platform)?;
    let cache_root = dirs::cache_dir().ok_or_else(|| {
        CoreError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine the user cache directory",
        ))
    })?;
    ensure_decoder(&payload, &cache_root)
}

/// Path the payload is installed at below `cache_root`.
pub fn cached_decoder_path(payload: &DecoderPayload, cache_root: &Path) -> PathBuf {
    let digest = format!("{:x}", Sha256::digest(payload.bytes));
    let prefix = &digest[..HASH_PREFIX_LEN];
    cache_root
        .join(APP_NAMESPACE)
        .join("bin")
        .join(format!("{prefix}-{}", payload.name))
}

/// Installs `payload` below `cache_root` unless an installed copy of the same
/// size is already present, and returns the executable path.
pub fn ensure_decoder(payload: &DecoderPayload, cache_root: &Path) -> CoreResult<PathBuf> {
    if payload.bytes.is_empty() || payload.name.is_empty() {
        return Err(unsupported_platform());
    }

    let out_path = cached_decoder_path(payload, cache_root);
    let bin_dir = out_path
        .parent()
        .ok_or_else(|| CoreError::PathError(format!("no parent for {}", out_path.display())))?;
    fs::create_dir_all(bin_dir)?;

    if is_installed(&out_path, payload) {
        log::debug!("Using cached decoder at {}", out_path.display());
        return Ok(out_path);
    }

    log::info!(
        "Installing bundled {} ({} bytes) to {}",
        payload.name,
        payload.bytes.len(),
        out_path.display()
    );

    let mut tmp = TempFileBuilder::new()
        .prefix(&format!(".{}", payload.name))
        .suffix(".tmp")
        .tempfile_in(bin_dir)?;
    tmp.write_all(payload.bytes)?;
    tmp.flush()?;
    set_executable(tmp.path())?;

    if let Err(persist_err) = tmp.persist(&out_path) {
        return recover_failed_install(persist_err, &out_path, payload);
    }

    set_executable(&out_path)?;
    Ok(out_path)
}

/// Removes the temporary file of a failed rename. A same-size file already at
/// `out_path` was installed by a concurrent run and is accepted.
fn recover_failed_install(
    persist_err: PersistError,
    out_path: &Path,
    payload: &DecoderPayload,
) -> CoreResult<PathBuf> {
    // Dropping the returned handle removes the temporary file.
    drop(persist_err.file);
    if is_installed(out_path, payload) {
        log::debug!(
            "Decoder was installed concurrently at {}",
            out_path.display()
        );
        return Ok(out_path.to_path_buf());
    }
    log::error!("Failed to install decoder: {}", persist_err.error);
    Err(CoreError::Io(persist_err.error))
}

fn is_installed(path: &Path, payload: &DecoderPayload) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() == payload.bytes.len() as u64)
        .unwrap_or(false)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn unsupported_platform() -> CoreError {
    CoreError::UnsupportedPlatform {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PAYLOAD: DecoderPayload = DecoderPayload {
        name: "ffmpeg",
        bytes: b"#!/bin/sh\nexit 0\n",
    };

    #[test]
    fn cached_path_is_content_addressed() {
        let root = Path::new("/cache");
        let path = cached_decoder_path(&PAYLOAD, root);
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert!(path.starts_with("/cache/kako/bin"));
        assert!(file_name.ends_with("-ffmpeg"));
        let (hash, _) = file_name.split_once('-').unwrap();
        assert_eq!(hash.len(), HASH_PREFIX_LEN);
        assert_eq!(hash, "306c6ca740756034");

        let other = DecoderPayload {
            name: "ffmpeg",
            bytes: b"different",
        };
        assert_ne!(cached_decoder_path(&other, root), path);
    }

    #[test]
    fn empty_payload_is_unsupported() {
        let root = tempdir().unwrap();
        let empty = DecoderPayload {
            name: "ffmpeg",
            bytes: b"",
        };
        assert!(matches!(
            ensure_decoder(&empty, root.path()),
            Err(CoreError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn installs_payload_bytes() {
        let root = tempdir().unwrap();
        let path = ensure_decoder(&PAYLOAD, root.path()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), PAYLOAD.bytes);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }

        // No temporary siblings are left behind.
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn same_size_file_is_trusted_without_rewrite() {
        let root = tempdir().unwrap();
        let path = cached_decoder_path(&PAYLOAD, root.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let impostor = vec![b'x'; PAYLOAD.bytes.len()];
        fs::write(&path, &impostor).unwrap();

        let located = ensure_decoder(&PAYLOAD, root.path()).unwrap();
        assert_eq!(located, path);
        assert_eq!(fs::read(&path).unwrap(), impostor);
    }

    #[test]
    fn wrong_size_file_is_replaced() {
        let root = tempdir().unwrap();
        let path = cached_decoder_path(&PAYLOAD, root.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"truncated").unwrap();

        ensure_decoder(&PAYLOAD, root.path()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), PAYLOAD.bytes);
    }

    /// A rename into a directory that does not exist always fails.
    fn failed_persist(dir: &Path) -> PersistError {
        let tmp = TempFileBuilder::new()
            .prefix(".ffmpeg")
            .suffix(".tmp")
            .tempfile_in(dir)
            .unwrap();
        tmp.persist(dir.join("missing").join("ffmpeg")).unwrap_err()
    }

    fn leftover_tmp_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().ends_with(".tmp"))
            .count()
    }

    #[test]
    fn directory_at_target_path_fails_without_leftovers() {
        let root = tempdir().unwrap();
        let path = cached_decoder_path(&PAYLOAD, root.path());
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("occupant"), b"keeps the directory non-empty").unwrap();

        let err = ensure_decoder(&PAYLOAD, root.path()).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)), "{err}");
        assert_eq!(leftover_tmp_files(path.parent().unwrap()), 0);
    }

    #[test]
    fn concurrent_same_size_install_is_accepted() {
        let dir = tempdir().unwrap();
        let persist_err = failed_persist(dir.path());
        let winner = dir.path().join("ffmpeg");
        fs::write(&winner, vec![b'w'; PAYLOAD.bytes.len()]).unwrap();

        let located = recover_failed_install(persist_err, &winner, &PAYLOAD).unwrap();
        assert_eq!(located, winner);
        assert_eq!(leftover_tmp_files(dir.path()), 0);
    }

    #[test]
    fn failed_persist_without_concurrent_install_is_an_io_error() {
        let dir = tempdir().unwrap();
        let persist_err = failed_persist(dir.path());
        let target = dir.path().join("ffmpeg");
        fs::write(&target, b"short").unwrap();

        let err = recover_failed_install(persist_err, &target, &PAYLOAD).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)), "{err}");
        assert_eq!(leftover_tmp_files(dir.path()), 0);
    }
}

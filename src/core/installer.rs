/*
 * The installability predicate. The controller treats this as a black-box
 * boolean over a file path; the concrete check only sniffs the file header for
 * an AppImage (an ELF executable carrying the `AI` marker and a type byte of 1
 * or 2 at offset 8). Nothing is extracted or validated beyond that.
 */
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];
const APPIMAGE_MARKER_OFFSET: usize = 8;
const APPIMAGE_HEADER_LEN: usize = 11;

pub trait InstallerOperations: Send + Sync {
    fn can_install_file(&self, path: &Path) -> bool;
}

pub struct CoreAppImageInstaller {}

impl CoreAppImageInstaller {
    pub fn new() -> Self {
        CoreAppImageInstaller {}
    }

    fn read_header(path: &Path) -> io::Result<[u8; APPIMAGE_HEADER_LEN]> {
        let mut header = [0u8; APPIMAGE_HEADER_LEN];
        File::open(path)?.read_exact(&mut header)?;
        Ok(header)
    }
}

impl Default for CoreAppImageInstaller {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_appimage_header(header: &[u8]) -> bool {
    if header.len() < APPIMAGE_HEADER_LEN || header[..4] != ELF_MAGIC {
        return false;
    }
    let marker = &header[APPIMAGE_MARKER_OFFSET..APPIMAGE_HEADER_LEN];
    marker[..2] == *b"AI" && matches!(marker[2], 1 | 2)
}

impl InstallerOperations for CoreAppImageInstaller {
    fn can_install_file(&self, path: &Path) -> bool {
        if !path.is_file() {
            log::debug!("CoreAppImageInstaller: {path:?} is not a regular file.");
            return false;
        }
        match Self::read_header(path) {
            Ok(header) => {
                let installable = is_appimage_header(&header);
                log::debug!("CoreAppImageInstaller: {path:?} installable = {installable}");
                installable
            }
            Err(e) => {
                log::debug!("CoreAppImageInstaller: Could not read header of {path:?}: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn appimage_header(kind: u8) -> Vec<u8> {
        let mut bytes = vec![0x7f, b'E', b'L', b'F', 2, 1, 1, 0, b'A', b'I', kind];
        bytes.extend_from_slice(&[0u8; 53]);
        bytes
    }

    #[test]
    fn test_accepts_type_1_and_type_2_appimages() {
        let dir = tempdir().unwrap();
        let installer = CoreAppImageInstaller::new();
        for kind in [1u8, 2u8] {
            let path = dir.path().join(format!("app-type{kind}.AppImage"));
            fs::write(&path, appimage_header(kind)).unwrap();
            assert!(installer.can_install_file(&path), "type {kind} should be accepted");
        }
    }

    #[test]
    fn test_rejects_plain_elf_and_text_files() {
        let dir = tempdir().unwrap();
        let installer = CoreAppImageInstaller::new();

        let plain_elf = dir.path().join("tool");
        let mut bytes = appimage_header(2);
        bytes[8] = 0;
        bytes[9] = 0;
        fs::write(&plain_elf, bytes).unwrap();
        assert!(!installer.can_install_file(&plain_elf));

        let text = dir.path().join("notes.AppImage");
        fs::write(&text, "just some text, long enough").unwrap();
        assert!(!installer.can_install_file(&text));
    }

    #[test]
    fn test_rejects_short_missing_and_directory_paths() {
        let dir = tempdir().unwrap();
        let installer = CoreAppImageInstaller::new();

        let short = dir.path().join("short");
        fs::write(&short, [0x7f, b'E', b'L', b'F']).unwrap();
        assert!(!installer.can_install_file(&short));
        assert!(!installer.can_install_file(&dir.path().join("missing")));
        assert!(!installer.can_install_file(dir.path()));
    }

    #[test]
    fn test_is_appimage_header_rejects_unknown_type() {
        assert!(!is_appimage_header(&appimage_header(3)));
        assert!(is_appimage_header(&appimage_header(2)));
    }
}

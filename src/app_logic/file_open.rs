/*
 * Predicate-gated routing for externally supplied files. Only the first file
 * of a batch is considered, and only if the installer accepts it.
 */
use crate::core::InstallerOperations;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FileOpenDispatcher {
    installer: Arc<dyn InstallerOperations>,
}

impl FileOpenDispatcher {
    pub fn new(installer: Arc<dyn InstallerOperations>) -> Self {
        FileOpenDispatcher { installer }
    }

    /*
     * Returns the file to hand to the window, or `None` when the batch is empty
     * or its first entry is not installable. The predicate is not consulted
     * for an empty batch.
     */
    pub fn accept<'a>(&self, files: &'a [PathBuf]) -> Option<&'a PathBuf> {
        let first = files.first()?;
        if files.len() > 1 {
            log::debug!(
                "FileOpenDispatcher: {} files supplied, only {first:?} is considered.",
                files.len()
            );
        }
        if self.installer.can_install_file(first) {
            Some(first)
        } else {
            log::info!("FileOpenDispatcher: {first:?} is not installable, ignoring.");
            None
        }
    }
}

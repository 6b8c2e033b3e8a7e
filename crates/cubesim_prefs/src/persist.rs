use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};
use serde::Serialize;

const PREFS_FILE_NAME: &str = "cubesim-prefs";
const PREFS_FILE_EXTENSION: &str = "yaml";

/// Returns the default location of the user preferences file.
pub fn prefs_file() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "cubesim").ok_or_eyre("no home directory")?;
    Ok(dirs
        .config_dir()
        .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")))
}

pub fn user_config_source(path: &Path) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path)
        .format(crate::PREFS_FILE_FORMAT)
        .required(false)
}

pub fn save(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    Ok(())
}

/// Renames a preferences file that could not be loaded so that it is not
/// overwritten. Emits a log message indicating success or failure.
pub fn move_to_backup_file(original: &Path) {
    if !original.exists() {
        return;
    }
    let mut backup_path = original.as_os_str().to_owned();
    backup_path.push(".bak");
    match std::fs::rename(original, &backup_path) {
        Ok(()) => log::info!(
            "Moved {} to {}",
            original.display(),
            Path::new(&backup_path).display(),
        ),
        Err(e) => log::error!("Error moving {} to backup file: {e}", original.display()),
    }
}

//! Writing a generated project archive to disk

use super::options::ProjectOptions;
use crate::error::InitializrError;
use anyhow::{Context, Result};
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Name used when the options carry neither a name nor an artifact id
const FALLBACK_NAME: &str = "demo";

/// What to do with the downloaded archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Unpack into a project directory
    #[default]
    Extract,
    /// Keep the archive as `<artifactId>.zip`
    Zipped,
}

/// Result of writing a project
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    /// Project directory, or the archive file in zipped mode
    pub path: PathBuf,
    /// Relative paths of the files written
    pub files: Vec<String>,
}

/// Directory name for an extracted project: name, then artifact id
pub fn project_dir_name(options: &ProjectOptions) -> Result<&str, InitializrError> {
    let name = [options.name.as_str(), options.artifact_id.as_str()]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(FALLBACK_NAME);
    single_component(name)
}

/// File name for a zipped project: artifact id, then name
pub fn archive_file_name(options: &ProjectOptions) -> Result<String, InitializrError> {
    let stem = [options.artifact_id.as_str(), options.name.as_str()]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(FALLBACK_NAME);
    Ok(format!("{}.zip", single_component(stem)?))
}

/// Names end up joined onto the parent directory and must stay inside it
fn single_component(name: &str) -> Result<&str, InitializrError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(name),
        _ => Err(InitializrError::InvalidProjectName(name.to_string())),
    }
}

/// Write a downloaded archive below `parent_dir`.
///
/// Never overwrites: the target directory (or zip file) must not exist yet.
pub fn write_project(
    archive: &[u8],
    options: &ProjectOptions,
    parent_dir: &Path,
    mode: OutputMode,
) -> Result<GeneratedProject> {
    match mode {
        OutputMode::Zipped => {
            let path = parent_dir.join(archive_file_name(options)?);
            if path.exists() {
                return Err(InitializrError::AlreadyExists(path).into());
            }
            fs::write(&path, archive)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "saved project archive");

            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(GeneratedProject {
                path,
                files: vec![file_name],
            })
        }
        OutputMode::Extract => {
            let target = parent_dir.join(project_dir_name(options)?);
            if target.exists() {
                return Err(InitializrError::AlreadyExists(target).into());
            }
            let files = match extract_archive(archive, &target) {
                Ok(files) => files,
                Err(e) => {
                    // Remove the partial project
                    if let Err(cleanup) = fs::remove_dir_all(&target) {
                        if target.exists() {
                            warn!(
                                path = %target.display(),
                                error = %cleanup,
                                "failed to remove partial project"
                            );
                        }
                    }
                    return Err(e);
                }
            };
            info!(path = %target.display(), files = files.len(), "extracted project");
            Ok(GeneratedProject {
                path: target,
                files,
            })
        }
    }
}

/// Extract every entry of a zip archive into `target_dir`
pub fn extract_archive(archive: &[u8], target_dir: &Path) -> Result<Vec<String>> {
    let mut archive =
        ZipArchive::new(Cursor::new(archive)).context("Failed to read project archive")?;

    fs::create_dir_all(target_dir)
        .with_context(|| format!("Failed to create directory: {}", target_dir.display()))?;

    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| InitializrError::UnsafeEntry(entry.name().to_string()))?;
        let target_path = target_dir.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target_path).with_context(|| {
                format!("Failed to create directory: {}", target_path.display())
            })?;
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .with_context(|| format!("Failed to read archive entry '{}'", entry.name()))?;
        fs::write(&target_path, &contents)
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target_path, fs::Permissions::from_mode(mode & 0o777))
                .with_context(|| format!("Failed to set permissions on {}", target_path.display()))?;
        }

        debug!(entry = %relative.display(), "extracted");
        written.push(relative.to_string_lossy().replace('\\', "/"));
    }

    Ok(written)
}

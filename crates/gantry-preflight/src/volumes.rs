//! Volume mount specification validation.
//!
//! A raw specification has the form `host-dir:ctr-dir[:options]`. The
//! host directory must exist (existence only — neither type nor
//! permissions are checked), the container directory must be absolute,
//! and the comma-separated options may name at most one entry from each
//! mutually exclusive group: access mode (`rw`/`ro`), SELinux relabeling
//! (`z`/`Z`), and mount propagation (`private`, `rprivate`, `shared`,
//! `rshared`, `slave`, `rslave`).

use gantry_common::error::{GantryError, Result};

/// A volume specification split into its three parts.
///
/// Transient: constructed, validated, and discarded per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSpec {
    /// Host directory to mount from.
    pub host_dir: String,
    /// Path inside the container.
    pub container_dir: String,
    /// Mount options, in the order given.
    pub options: Vec<String>,
}

impl VolumeSpec {
    /// Splits a raw specification on `:` into at most three parts.
    ///
    /// Splitting performs no semantic checks; see [`validate_volumes`].
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::VolumeFormat`] when fewer than two parts
    /// are present.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.splitn(3, ':');
        let (Some(host_dir), Some(container_dir)) = (parts.next(), parts.next()) else {
            return Err(GantryError::VolumeFormat { spec: spec.into() });
        };
        let options = parts
            .next()
            .map_or_else(Vec::new, |opts| opts.split(',').map(ToOwned::to_owned).collect());
        Ok(Self {
            host_dir: host_dir.into(),
            container_dir: container_dir.into(),
            options,
        })
    }
}

/// Validates a list of raw volume specifications.
///
/// Validation stops at the first failing entry; entries after it are not
/// examined.
///
/// # Errors
///
/// Returns the first format, host-path, container-path, or option error
/// found.
pub fn validate_volumes(specs: &[String]) -> Result<()> {
    for spec in specs {
        let parsed = VolumeSpec::parse(spec)?;
        check_host_dir(&parsed.host_dir)?;
        check_container_dir(&parsed.container_dir)?;
        if !parsed.options.is_empty() {
            check_options(&parsed.options)?;
        }
    }
    Ok(())
}

fn check_host_dir(host_dir: &str) -> Result<()> {
    // existence check only; a plain file is an acceptable mount source
    let _ = std::fs::metadata(host_dir).map_err(|source| GantryError::VolumeHostPath {
        path: host_dir.into(),
        source,
    })?;
    Ok(())
}

fn check_container_dir(container_dir: &str) -> Result<()> {
    if !container_dir.starts_with('/') {
        return Err(GantryError::VolumeContainerPath {
            path: container_dir.into(),
        });
    }
    Ok(())
}

fn check_options(options: &[String]) -> Result<()> {
    let mut access_seen = false;
    let mut relabel_seen = false;
    let mut propagation_seen = false;
    for option in options {
        let group = match option.as_str() {
            "rw" | "ro" => (&mut access_seen, "'rw' or 'ro'"),
            "z" | "Z" => (&mut relabel_seen, "'z' or 'Z'"),
            "private" | "rprivate" | "shared" | "rshared" | "slave" | "rslave" => {
                (&mut propagation_seen, "'[r]shared', '[r]private' or '[r]slave'")
            }
            other => {
                return Err(GantryError::VolumeOptionUnknown {
                    option: other.into(),
                });
            }
        };
        let (seen, name) = group;
        if *seen {
            return Err(GantryError::VolumeOptionConflict {
                options: options.join(","),
                group: name,
            });
        }
        *seen = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_dir() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn parse_splits_three_parts() {
        let spec = VolumeSpec::parse("/src:/dst:ro,Z").expect("should parse");
        assert_eq!(spec.host_dir, "/src");
        assert_eq!(spec.container_dir, "/dst");
        assert_eq!(spec.options, ["ro", "Z"]);
    }

    #[test]
    fn parse_without_options() {
        let spec = VolumeSpec::parse("/src:/dst").expect("should parse");
        assert!(spec.options.is_empty());
    }

    #[test]
    fn parse_single_part_fails() {
        let err = VolumeSpec::parse("/only-host").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("incorrect volume format"), "got: {msg}");
    }

    #[test]
    fn validate_empty_list_succeeds() {
        assert!(validate_volumes(&[]).is_ok());
    }

    #[test]
    fn validate_existing_host_and_absolute_container() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data")];
        assert!(validate_volumes(&specs).is_ok());
    }

    #[test]
    fn validate_accepts_one_option_per_group() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data:ro,Z,rprivate")];
        assert!(validate_volumes(&specs).is_ok());
    }

    #[test]
    fn validate_host_file_passes_existence_check() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("disk.img");
        std::fs::write(&file, "x").expect("write");
        let specs = vec![format!("{}:/data", file.display())];
        assert!(validate_volumes(&specs).is_ok());
    }

    #[test]
    fn validate_missing_host_path_fails() {
        let specs = vec!["/definitely/not/here:/data".to_owned()];
        let err = validate_volumes(&specs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/definitely/not/here"), "got: {msg}");
    }

    #[test]
    fn validate_relative_container_path_fails() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:rel/path")];
        let err = validate_volumes(&specs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("must be absolute"), "got: {msg}");
    }

    #[test]
    fn validate_two_access_modes_fails() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data:rw,ro")];
        let err = validate_volumes(&specs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'rw' or 'ro'"), "got: {msg}");
    }

    #[test]
    fn validate_two_relabel_options_fails() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data:z,Z")];
        assert!(validate_volumes(&specs).is_err());
    }

    #[test]
    fn validate_two_propagation_modes_fails() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data:shared,rslave")];
        let err = validate_volumes(&specs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'[r]shared'"), "got: {msg}");
    }

    #[test]
    fn validate_unknown_option_fails() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data:loud")];
        let err = validate_volumes(&specs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("loud"), "got: {msg}");
    }

    #[test]
    fn validate_stops_at_the_first_bad_entry() {
        let (_guard, host) = host_dir();
        let specs = vec![format!("{host}:/data"), "broken".to_owned()];
        assert!(validate_volumes(&specs).is_err());
    }
}

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Platform base directory for application state:
/// Windows: %APPDATA%, Unix/macOS: $HOME.
fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| anyhow!("{} environment variable is not set", var))
}

/// Expand a leading "~" or "~/..." into the platform base directory.
fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return platform_base_dir();
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return Ok(platform_base_dir()?.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Resolve the application home directory to an absolute path.
///
/// - `home_dir = None` => `<platform base>/<default_subdir>`
/// - `home_dir = Some("~/...")` => tilde expanded against the platform base
/// - relative paths are resolved against the current working directory
///
/// When `create` is true the directory is created if missing.
pub fn resolve_home_dir(
    home_dir: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match home_dir {
        None => platform_base_dir()?.join(default_subdir),
        Some(raw) => {
            let expanded = expand_tilde(raw.trim())?;
            if expanded.is_relative() {
                std::env::current_dir()
                    .context("cannot resolve current directory")?
                    .join(expanded)
            } else {
                expanded
            }
        }
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("cannot create home dir {}", resolved.display()))?;
    }

    Ok(resolved)
}

/// Resolve a log file path against `base_dir` (home_dir).
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
pub fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // These rely on the platform base env var (HOME / APPDATA) being set,
    // which holds in any normal shell and in CI. They deliberately avoid
    // mutating it: tests in this binary run in parallel.

    #[test]
    fn test_default_subdir_under_platform_base() {
        let resolved = resolve_home_dir(None, ".profile-server", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with(".profile-server"));
    }

    #[test]
    fn test_tilde_expansion() {
        let resolved =
            resolve_home_dir(Some("~/.custom_home".to_string()), ".unused", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(!resolved.to_string_lossy().contains('~'));
        assert!(resolved.ends_with(".custom_home"));
    }

    #[test]
    fn test_absolute_path_kept() {
        let tmp = tempdir().unwrap();
        let abs = tmp.path().join("explicit_home");

        let resolved = resolve_home_dir(
            Some(abs.to_string_lossy().to_string()),
            ".unused",
            false,
        )
        .unwrap();
        assert_eq!(resolved, abs);
    }

    #[test]
    fn test_create_makes_directory() {
        let tmp = tempdir().unwrap();
        let abs = tmp.path().join("nested/home");

        let resolved =
            resolve_home_dir(Some(abs.to_string_lossy().to_string()), ".unused", true).unwrap();
        assert!(resolved.exists());
        assert!(resolved.is_dir());
    }

    #[test]
    fn test_resolve_log_path_relative_and_absolute() {
        let tmp = tempdir().unwrap();

        let rel = resolve_log_path("logs/app.log", tmp.path());
        assert!(rel.starts_with(tmp.path()));
        assert!(rel.ends_with("logs/app.log"));

        let abs_src = tmp.path().join("abs.log");
        let abs = resolve_log_path(&abs_src.to_string_lossy(), Path::new("/elsewhere"));
        assert_eq!(abs, abs_src);
    }
}

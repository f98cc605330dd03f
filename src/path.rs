use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

const ELECTRON_ARCHIVE: &str = "electron.asar";
const ARCHIVE_EXT: &str = ".asar";
const UNPACKED_SUFFIX: &str = ".unpacked";

/// Map a library location inside a packaged app archive to its unpacked
/// mirror on disk.
///
/// Relative paths are left to the platform's library search. Paths inside
/// Electron's own archive, or outside any archive, come back unchanged.
/// Only the outermost `*.asar` directory is rewritten; a path ending in the
/// archive itself is not inside it.
pub fn resolve(location: &Path) -> PathBuf {
    if !location.is_absolute() {
        return location.to_path_buf();
    }

    let mut rewritten = PathBuf::new();
    let mut remapped = false;

    let components: Vec<Component> = location.components().collect();
    let last = components.len().saturating_sub(1);

    for (i, component) in components.into_iter().enumerate() {
        if let Component::Normal(name) = component {
            let text = name.to_string_lossy();
            if text == ELECTRON_ARCHIVE {
                return location.to_path_buf();
            }
            if !remapped && i < last && text.ends_with(ARCHIVE_EXT) {
                let mut unpacked = OsString::from(name);
                unpacked.push(UNPACKED_SUFFIX);
                rewritten.push(unpacked);
                remapped = true;
                continue;
            }
        }
        rewritten.push(component.as_os_str());
    }

    if remapped {
        tracing::debug!(from = %location.display(), to = %rewritten.display(), "remapped archived library path");
        rewritten
    } else {
        location.to_path_buf()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_unchanged() {
        assert_eq!(resolve(Path::new("lib/libF4_MDS.so")), PathBuf::from("lib/libF4_MDS.so"));
        assert_eq!(resolve(Path::new("app.asar/lib/x.so")), PathBuf::from("app.asar/lib/x.so"));
    }

    #[test]
    fn test_plain_absolute_path_unchanged() {
        let path = Path::new("/opt/reader/lib/libF4_MDS.so");
        assert_eq!(resolve(path), path);
    }

    #[test]
    fn test_archive_path_remapped() {
        let path = Path::new("/opt/App/resources/app.asar/node_modules/f4/lib/libF4_MDS.so");
        assert_eq!(
            resolve(path),
            PathBuf::from("/opt/App/resources/app.asar.unpacked/node_modules/f4/lib/libF4_MDS.so")
        );
    }

    #[test]
    fn test_only_first_archive_remapped() {
        let path = Path::new("/r/app.asar/inner.asar/lib.so");
        assert_eq!(resolve(path), PathBuf::from("/r/app.asar.unpacked/inner.asar/lib.so"));
    }

    #[test]
    fn test_electron_archive_untouched() {
        let path = Path::new("/opt/App/resources/electron.asar/lib/libF4_MDS.so");
        assert_eq!(resolve(path), path);
    }

    #[test]
    fn test_lookalike_names_untouched() {
        let path = Path::new("/opt/app.asarx/lib.so");
        assert_eq!(resolve(path), path);
    }

    #[test]
    fn test_archive_as_last_component_untouched() {
        let path = Path::new("/opt/App/resources/app.asar");
        assert_eq!(resolve(path), path);
    }

    #[test]
    fn test_bare_archive_name_remapped() {
        let path = Path::new("/opt/.asar/lib.so");
        assert_eq!(resolve(path), PathBuf::from("/opt/.asar.unpacked/lib.so"));
    }
}

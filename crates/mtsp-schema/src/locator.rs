//! Locator algebra for manifests and the assets they reference.
//!
//! All functions are pure: they only rewrite the path of a [`Url`] and never
//! touch the network. Locators that cannot carry a hierarchical path
//! (`mailto:`, `data:` and friends) never resolve.

use url::Url;

/// File extension identifying an MTSP manifest.
pub const MANIFEST_EXTENSION: &str = "mtsp";

/// Base name assumed when a locator points at a directory.
pub const DEFAULT_BASENAME: &str = "index";

const PARENT_DIR: &str = "../";

/// Map an arbitrary locator onto the locator of its manifest.
///
/// - `.../index.mtsp` is returned unchanged.
/// - `.../index.html` has its extension replaced: `.../index.mtsp`.
/// - `.../` (or a bare host) gets the default name: `.../index.mtsp`. A
///   trailing slash always names a directory, even after `index.html/`.
/// - `.../index` and `.../index.` cannot be mapped and yield `None`.
pub fn derive_manifest_locator(input: &Url) -> Option<Url> {
    if input.cannot_be_a_base() {
        return None;
    }

    let path = input.path();
    let (parent, segment) = path.rsplit_once('/')?;

    let rewritten = if segment.is_empty() {
        format!("{path}{DEFAULT_BASENAME}.{MANIFEST_EXTENSION}")
    } else {
        let (stem, extension) = split_extension(segment)?;
        if extension == MANIFEST_EXTENSION {
            return Some(input.clone());
        }
        format!("{parent}/{stem}.{MANIFEST_EXTENSION}")
    };

    let mut locator = input.clone();
    locator.set_path(&rewritten);
    Some(locator)
}

/// Resolve a manifest-relative file path against the manifest's directory.
///
/// Returns `None` when the path is missing, empty, or has no `.` in it.
pub fn resolve_file(relative: Option<&str>, manifest: &Url) -> Option<Url> {
    let relative = relative.filter(|path| !path.is_empty())?;
    if !relative.contains('.') || manifest.cannot_be_a_base() {
        return None;
    }
    Some(append_path(&containing_directory(manifest), relative))
}

/// Resolve the path half of a navigation entry (`<label><separator><path>`).
///
/// Every `../` in the path walks one directory up from the manifest's
/// directory, and whatever follows the last `../` is appended. Note that
/// occurrences are counted across the whole path, not only the leading run:
/// `a/../b` climbs one level and resolves to `b` there.
pub fn resolve_navigation(entry: &str, separator: &str, manifest: &Url) -> Option<Url> {
    let (_, path) = split_navigation(entry, separator)?;
    if manifest.cannot_be_a_base() {
        return None;
    }

    let levels = path.matches(PARENT_DIR).count();
    let remainder = path
        .rfind(PARENT_DIR)
        .map_or(path, |idx| &path[idx + PARENT_DIR.len()..]);

    let mut base = containing_directory(manifest);
    for _ in 0..levels {
        base = containing_directory(&base);
    }
    Some(append_path(&base, remainder))
}

/// Split a navigation entry into `(label, path)`.
///
/// The separator must occur exactly once.
pub fn split_navigation<'a>(entry: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    if separator.is_empty() {
        return None;
    }
    let mut parts = entry.split(separator);
    let label = parts.next()?;
    let path = parts.next()?;
    parts.next().is_none().then_some((label, path))
}

/// `index.html` -> `("index", "html")`. Hidden files and trailing dots have no extension.
fn split_extension(segment: &str) -> Option<(&str, &str)> {
    let (stem, extension) = segment.rsplit_once('.')?;
    (!stem.is_empty() && !extension.is_empty()).then_some((stem, extension))
}

/// Drop the last path segment, keeping a trailing slash. Saturates at `/`.
fn containing_directory(locator: &Url) -> Url {
    let path = locator.path();
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let parent = trimmed.rfind('/').map_or("/", |idx| &trimmed[..=idx]);

    let mut dir = locator.clone();
    dir.set_path(parent);
    dir.set_query(None);
    dir.set_fragment(None);
    dir
}

fn append_path(dir: &Url, relative: &str) -> Url {
    let mut locator = dir.clone();
    let joined = format!("{}{}", dir.path(), relative.trim_start_matches('/'));
    locator.set_path(&joined);
    locator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn manifest_locator_from_exact() {
        let input = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(derive_manifest_locator(&input), Some(input.clone()));
    }

    #[test]
    fn manifest_locator_from_index_html() {
        let input = url("https://metaspace.rocks/mtsp/index.html");
        assert_eq!(
            derive_manifest_locator(&input),
            Some(url("https://metaspace.rocks/mtsp/index.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_keeps_base_name() {
        let input = url("https://metaspace.rocks/mtsp/gallery.php");
        assert_eq!(
            derive_manifest_locator(&input),
            Some(url("https://metaspace.rocks/mtsp/gallery.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_replaces_only_last_extension() {
        let input = url("https://metaspace.rocks/mtsp/scene.v2.html");
        assert_eq!(
            derive_manifest_locator(&input),
            Some(url("https://metaspace.rocks/mtsp/scene.v2.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_empty_extension_fails() {
        let input = url("https://metaspace.rocks/mtsp/index.");
        assert_eq!(derive_manifest_locator(&input), None);
    }

    #[test]
    fn manifest_locator_no_extension_fails() {
        let input = url("https://metaspace.rocks/mtsp/index");
        assert_eq!(derive_manifest_locator(&input), None);
    }

    #[test]
    fn manifest_locator_from_directory() {
        let input = url("https://metaspace.rocks/mtsp/");
        assert_eq!(
            derive_manifest_locator(&input),
            Some(url("https://metaspace.rocks/mtsp/index.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_trailing_slash_is_a_directory() {
        assert_eq!(
            derive_manifest_locator(&url("https://metaspace.rocks/mtsp/index.mtsp/")),
            Some(url("https://metaspace.rocks/mtsp/index.mtsp/index.mtsp"))
        );
        assert_eq!(
            derive_manifest_locator(&url("https://metaspace.rocks/mtsp/index.html/")),
            Some(url("https://metaspace.rocks/mtsp/index.html/index.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_from_bare_host() {
        let input = url("https://metaspace.rocks");
        assert_eq!(
            derive_manifest_locator(&input),
            Some(url("https://metaspace.rocks/index.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_preserves_percent_encoding() {
        let input = url("https://metaspace.rocks/my%20space/index.html");
        assert_eq!(
            derive_manifest_locator(&input),
            Some(url("https://metaspace.rocks/my%20space/index.mtsp"))
        );
    }

    #[test]
    fn manifest_locator_for_opaque_url_fails() {
        let input = url("mailto:someone@metaspace.rocks");
        assert_eq!(derive_manifest_locator(&input), None);
    }

    #[test]
    fn file_viable_path() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_file(Some("preview.jpg"), &manifest),
            Some(url("https://metaspace.rocks/mtsp/preview.jpg"))
        );
    }

    #[test]
    fn file_nested_path() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_file(Some("assets/scene.usdz"), &manifest),
            Some(url("https://metaspace.rocks/mtsp/assets/scene.usdz"))
        );
    }

    #[test]
    fn file_drops_manifest_query() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp?rev=3#top");
        assert_eq!(
            resolve_file(Some("preview.jpg"), &manifest),
            Some(url("https://metaspace.rocks/mtsp/preview.jpg"))
        );
    }

    #[test]
    fn file_encodes_spaces() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_file(Some("my preview.jpg"), &manifest),
            Some(url("https://metaspace.rocks/mtsp/my%20preview.jpg"))
        );
    }

    #[test]
    fn file_without_extension_fails() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(resolve_file(Some("preview"), &manifest), None);
    }

    #[test]
    fn file_empty_path_fails() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(resolve_file(Some(""), &manifest), None);
    }

    #[test]
    fn file_missing_path_fails() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(resolve_file(None, &manifest), None);
    }

    #[test]
    fn navigation_viable_path() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_navigation("some_path -> result/index.mtsp", " -> ", &manifest),
            Some(url("https://metaspace.rocks/mtsp/result/index.mtsp"))
        );
    }

    #[test]
    fn navigation_up_one_level() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_navigation("some_path -> ../index.mtsp", " -> ", &manifest),
            Some(url("https://metaspace.rocks/index.mtsp"))
        );
    }

    #[test]
    fn navigation_up_two_levels() {
        let manifest = url("https://metaspace.rocks/mtsp/path/index.mtsp");
        assert_eq!(
            resolve_navigation("some_path -> ../../index.mtsp", " -> ", &manifest),
            Some(url("https://metaspace.rocks/index.mtsp"))
        );
    }

    #[test]
    fn navigation_up_past_root_saturates() {
        let manifest = url("https://metaspace.rocks/index.mtsp");
        assert_eq!(
            resolve_navigation("home -> ../../index.mtsp", " -> ", &manifest),
            Some(url("https://metaspace.rocks/index.mtsp"))
        );
    }

    #[test]
    fn navigation_counts_inner_parent_segments() {
        let manifest = url("https://metaspace.rocks/mtsp/path/index.mtsp");
        assert_eq!(
            resolve_navigation("odd -> sub/../other.mtsp", " -> ", &manifest),
            Some(url("https://metaspace.rocks/mtsp/other.mtsp"))
        );
    }

    #[test]
    fn navigation_wrong_separator_fails() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_navigation("some_path - result/index.mtsp", " -> ", &manifest),
            None
        );
    }

    #[test]
    fn navigation_repeated_separator_fails() {
        let manifest = url("https://metaspace.rocks/mtsp/index.mtsp");
        assert_eq!(
            resolve_navigation("a -> b -> index.mtsp", " -> ", &manifest),
            None
        );
    }

    #[test]
    fn split_navigation_label_and_path() {
        assert_eq!(
            split_navigation("lobby -> lobby/index.mtsp", " -> "),
            Some(("lobby", "lobby/index.mtsp"))
        );
        assert_eq!(split_navigation("lobby", " -> "), None);
        assert_eq!(split_navigation("lobby -> x", ""), None);
    }
}

mod common;

use microserve::routing::static_files::{AssetStore, StaticFiles, normalize_root};

fn sample_site(name: &str) -> std::path::PathBuf {
    let base = common::scratch_dir(name);
    let public = base.join("public");
    std::fs::create_dir_all(public.join("css")).unwrap();
    std::fs::write(public.join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(public.join("css/site.css"), "body{}").unwrap();
    std::fs::write(public.join("notes.unknownext"), "??").unwrap();
    std::fs::write(base.join("secret.txt"), "top secret").unwrap();
    public
}

#[test]
fn test_normalize_root() {
    assert_eq!(normalize_root(""), "");
    assert_eq!(normalize_root("/"), "");
    assert_eq!(normalize_root("public"), "/public");
    assert_eq!(normalize_root("/public/"), "/public");
    assert_eq!(normalize_root("a/b/"), "/a/b");
    assert_eq!(normalize_root("//"), "");
    assert_eq!(normalize_root("/a//"), "/a");
}

#[test]
fn test_from_dir_enumerates_files() {
    let public = sample_site("enumerate");
    let store = AssetStore::from_dir(&public).unwrap();

    assert_eq!(store.file_count(), 3);
    assert!(store.contains("index.html"));
    assert!(store.contains("css/site.css"));
    assert!(!store.contains("css"));
    assert!(!store.contains("secret.txt"));
    assert!(!store.contains("../secret.txt"));
}

#[test]
fn test_from_dir_missing_directory() {
    let missing = std::env::temp_dir().join("microserve-no-such-assets");
    assert!(AssetStore::from_dir(missing).is_err());
}

#[tokio::test]
async fn test_resolve_index_and_nested() {
    let files = StaticFiles::new(AssetStore::from_dir(sample_site("nested")).unwrap());

    let index = files.resolve("/").await.unwrap().unwrap();
    assert_eq!(index.key, "index.html");
    assert_eq!(index.content_type, "text/html");
    assert_eq!(index.body.as_ref(), b"<h1>home</h1>");

    let css = files.resolve("/css/site.css").await.unwrap().unwrap();
    assert_eq!(css.content_type, "text/css");

    let other = files.resolve("/notes.unknownext").await.unwrap().unwrap();
    assert_eq!(other.content_type, "application/octet-stream");
}

#[tokio::test]
async fn test_resolve_rejects_traversal() {
    let files = StaticFiles::new(AssetStore::from_dir(sample_site("traversal")).unwrap());

    for path in [
        "/../secret.txt",
        "/../../../etc/passwd",
        "/%2E%2E%2Fsecret.txt",
        "/%2e%2e/secret.txt",
        "/css/../../secret.txt",
        "//etc/passwd",
        "/css",
        "/css/",
    ] {
        assert!(
            files.resolve(path).await.unwrap().is_none(),
            "{path} should not resolve"
        );
    }
}

#[tokio::test]
async fn test_resolve_under_static_root() {
    let mut store = AssetStore::new();
    store.insert("site/index.html", "site home");
    store.insert("index.html", "outer home");
    let mut files = StaticFiles::new(store);
    files.set_root("site/");

    assert_eq!(files.root(), "/site");
    let index = files.resolve("/").await.unwrap().unwrap();
    assert_eq!(index.body.as_ref(), b"site home");
    assert!(files.resolve("/../index.html").await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolve_decodes_percent_escapes() {
    let mut store = AssetStore::new();
    store.insert("my file.txt", "spaced");
    let files = StaticFiles::new(store);

    let asset = files.resolve("/my%20file.txt").await.unwrap().unwrap();
    assert_eq!(asset.body.as_ref(), b"spaced");
}

#[tokio::test]
async fn test_removed_file_is_io_error() {
    let public = sample_site("removed");
    let files = StaticFiles::new(AssetStore::from_dir(&public).unwrap());
    std::fs::remove_file(public.join("css/site.css")).unwrap();

    assert!(files.resolve("/css/site.css").await.is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinks_are_not_followed() {
    let public = sample_site("symlink");
    std::os::unix::fs::symlink(public.join("../secret.txt"), public.join("leak.txt")).unwrap();
    std::os::unix::fs::symlink(public.parent().unwrap(), public.join("up")).unwrap();

    let files = StaticFiles::new(AssetStore::from_dir(&public).unwrap());
    assert!(files.resolve("/leak.txt").await.unwrap().is_none());
    assert!(files.resolve("/up/secret.txt").await.unwrap().is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn test_file_swapped_for_symlink_after_startup() {
    let public = sample_site("swapped");
    let files = StaticFiles::new(AssetStore::from_dir(&public).unwrap());

    std::fs::remove_file(public.join("css/site.css")).unwrap();
    std::os::unix::fs::symlink(public.join("../secret.txt"), public.join("css/site.css")).unwrap();

    assert!(files.resolve("/css/site.css").await.unwrap().is_none());
    assert!(files.resolve("/index.html").await.unwrap().is_some());
}

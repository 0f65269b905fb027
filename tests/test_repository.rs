use std::fs;
use std::path::PathBuf;

use alcove::config::StaticFilesConfig;
use alcove::content::{DiskRepository, ErrorPage, Resolution, ResourceRepository};

/// Builds a disposable content/errors tree under the system temp directory.
fn temp_tree(tag: &str) -> (StaticFilesConfig, PathBuf) {
    let root = std::env::temp_dir().join(format!("alcove-repo-{}-{}", tag, std::process::id()));
    let content = root.join("content");
    let errors = root.join("errors");

    fs::create_dir_all(content.join("sub")).unwrap();
    fs::create_dir_all(&errors).unwrap();
    fs::write(content.join("index.html"), b"<html>home</html>").unwrap();
    fs::write(content.join("hello.html"), b"<html>hello</html>").unwrap();
    fs::write(content.join("sub").join("page.html"), b"<html>sub</html>").unwrap();
    fs::write(errors.join("400.html"), b"<html>400</html>").unwrap();
    fs::write(errors.join("404.html"), b"<html>404</html>").unwrap();

    let cfg = StaticFilesConfig {
        content_root: content,
        error_root: errors,
        index_file: "index.html".to_string(),
    };
    (cfg, root)
}

#[test]
fn test_resolve_root_maps_to_index_document() {
    let (cfg, root) = temp_tree("root");
    let repo = DiskRepository::new(&cfg);

    match repo.resolve("/") {
        Resolution::Found(resource) => {
            assert_eq!(repo.read(&resource).unwrap(), b"<html>home</html>");
        }
        other => panic!("expected Found, got {:?}", other),
    }

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_resolve_existing_file() {
    let (cfg, root) = temp_tree("hit");
    let repo = DiskRepository::new(&cfg);

    match repo.resolve("/hello.html") {
        Resolution::Found(resource) => {
            assert_eq!(repo.size(&resource).unwrap(), 18);
            assert_eq!(repo.read(&resource).unwrap(), b"<html>hello</html>");
        }
        other => panic!("expected Found, got {:?}", other),
    }

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_resolve_nested_path() {
    let (cfg, root) = temp_tree("nested");
    let repo = DiskRepository::new(&cfg);

    assert!(matches!(repo.resolve("/sub/page.html"), Resolution::Found(_)));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_resolve_missing_file() {
    let (cfg, root) = temp_tree("miss");
    let repo = DiskRepository::new(&cfg);

    assert_eq!(repo.resolve("/missing.html"), Resolution::NotFound);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_resolve_directory_is_not_found() {
    let (cfg, root) = temp_tree("dir");
    let repo = DiskRepository::new(&cfg);

    assert_eq!(repo.resolve("/sub"), Resolution::NotFound);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_resolve_rejects_traversal() {
    let (cfg, root) = temp_tree("traversal");
    let repo = DiskRepository::new(&cfg);

    assert_eq!(repo.resolve("/../errors/404.html"), Resolution::Rejected);
    assert_eq!(repo.resolve("/sub/../../hello.html"), Resolution::Rejected);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_error_pages_come_from_error_root() {
    let (cfg, root) = temp_tree("errors");
    let repo = DiskRepository::new(&cfg);

    let bad_request = repo.error_page(ErrorPage::BadRequest);
    let not_found = repo.error_page(ErrorPage::NotFound);

    assert_eq!(repo.read(&bad_request).unwrap(), b"<html>400</html>");
    assert_eq!(repo.read(&not_found).unwrap(), b"<html>404</html>");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn test_read_of_missing_resource_is_an_error() {
    let (cfg, root) = temp_tree("gone");
    let repo = DiskRepository::new(&cfg);

    let resource = match repo.resolve("/hello.html") {
        Resolution::Found(r) => r,
        other => panic!("expected Found, got {:?}", other),
    };

    fs::remove_file(resource.path()).unwrap();

    assert!(repo.read(&resource).is_err());
    assert!(repo.size(&resource).is_err());

    let _ = fs::remove_dir_all(root);
}

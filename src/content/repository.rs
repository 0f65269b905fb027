//! Resource repository
//!
//! The response builder never touches the filesystem directly; it goes
//! through a [`ResourceRepository`], so tests can substitute an in-memory
//! tree for the real content directories.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::StaticFilesConfig;

/// A concrete resource selected to back one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: PathBuf,
}

impl Resource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the resource. For the disk repository this is a real
    /// file path; the in-memory repository uses it as a lookup key.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outcome of mapping a request path onto the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path maps to a servable resource.
    Found(Resource),
    /// The path is well-formed but nothing exists there.
    NotFound,
    /// The path tries to climb out of the content root.
    Rejected,
}

/// The two fixed error pages every repository must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    BadRequest,
    NotFound,
}

impl ErrorPage {
    fn file_name(&self) -> &'static str {
        match self {
            ErrorPage::BadRequest => "400.html",
            ErrorPage::NotFound => "404.html",
        }
    }
}

/// Read-only access to the trees of servable resources.
pub trait ResourceRepository: Send + Sync {
    /// Map a request path to a resource under the content root.
    fn resolve(&self, path: &str) -> Resolution;

    /// Fixed page served with an error response.
    fn error_page(&self, page: ErrorPage) -> Resource;

    /// Size of the resource in bytes.
    fn size(&self, resource: &Resource) -> io::Result<u64>;

    /// Full contents of the resource.
    fn read(&self, resource: &Resource) -> io::Result<Vec<u8>>;
}

/// Repository backed by the configured content and error directories.
pub struct DiskRepository {
    content_root: PathBuf,
    error_root: PathBuf,
    index_file: String,
}

impl DiskRepository {
    pub fn new(cfg: &StaticFilesConfig) -> Self {
        Self {
            content_root: cfg.content_root.clone(),
            error_root: cfg.error_root.clone(),
            index_file: cfg.index_file.clone(),
        }
    }
}

impl ResourceRepository for DiskRepository {
    fn resolve(&self, path: &str) -> Resolution {
        if has_traversal(path) {
            return Resolution::Rejected;
        }

        // "/" always maps to the index document; any other path is the
        // content root plus the request path, taken verbatim.
        if path == "/" {
            return Resolution::Found(Resource::new(self.content_root.join(&self.index_file)));
        }

        let mut candidate = self.content_root.clone().into_os_string();
        candidate.push(path);
        let candidate = PathBuf::from(candidate);

        if candidate.is_file() {
            Resolution::Found(Resource::new(candidate))
        } else {
            Resolution::NotFound
        }
    }

    fn error_page(&self, page: ErrorPage) -> Resource {
        Resource::new(self.error_root.join(page.file_name()))
    }

    fn size(&self, resource: &Resource) -> io::Result<u64> {
        Ok(std::fs::metadata(resource.path())?.len())
    }

    fn read(&self, resource: &Resource) -> io::Result<Vec<u8>> {
        std::fs::read(resource.path())
    }
}

/// Repository holding its resources in memory, for tests.
pub struct MemoryRepository {
    files: HashMap<PathBuf, Vec<u8>>,
    index_file: String,
}

impl MemoryRepository {
    pub fn new() -> Self {
        let mut repo = Self {
            files: HashMap::new(),
            index_file: "index.html".to_string(),
        };
        repo.insert("errors/400.html", b"<html>400</html>".to_vec());
        repo.insert("errors/404.html", b"<html>404</html>".to_vec());
        repo
    }

    /// Add a file under a repository-relative path such as
    /// `content/index.html` or `errors/404.html`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRepository for MemoryRepository {
    fn resolve(&self, path: &str) -> Resolution {
        if has_traversal(path) {
            return Resolution::Rejected;
        }

        if path == "/" {
            return Resolution::Found(Resource::new(PathBuf::from("content").join(&self.index_file)));
        }

        let candidate = PathBuf::from(format!("content{}", path));
        if self.files.contains_key(&candidate) {
            Resolution::Found(Resource::new(candidate))
        } else {
            Resolution::NotFound
        }
    }

    fn error_page(&self, page: ErrorPage) -> Resource {
        Resource::new(PathBuf::from("errors").join(page.file_name()))
    }

    fn size(&self, resource: &Resource) -> io::Result<u64> {
        self.files
            .get(resource.path())
            .map(|b| b.len() as u64)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such resource"))
    }

    fn read(&self, resource: &Resource) -> io::Result<Vec<u8>> {
        self.files
            .get(resource.path())
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such resource"))
    }
}

fn has_traversal(path: &str) -> bool {
    path.split('/').any(|segment| segment == "..")
}

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};

/// One `class/type` leaf directory and the config document expected in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub class_name: String,
    pub type_name: String,
    pub config_path: PathBuf,
}

/// Walks the two-level `root/<class>/<type>/` layout.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
    config: RegistryConfig,
}

impl DirectoryScanner {
    /// Create a scanner with default config.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, RegistryConfig::default())
    }

    /// Create a scanner with explicit config.
    pub fn with_config(root: impl Into<PathBuf>, config: RegistryConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Start a fresh traversal.
    ///
    /// Nothing is read until the iterator is first advanced. Entries come
    /// back in whatever order the filesystem lists them. The iterator stops
    /// after yielding its first error.
    pub fn scan(&self) -> LeafIter<'_> {
        LeafIter {
            scanner: self,
            classes: None,
            current: None,
            done: false,
        }
    }
}

struct ClassDir {
    name: String,
    path: PathBuf,
    types: ReadDir,
}

/// Lazy iterator over the leaves under a scanner's root.
pub struct LeafIter<'a> {
    scanner: &'a DirectoryScanner,
    classes: Option<ReadDir>,
    current: Option<ClassDir>,
    done: bool,
}

impl LeafIter<'_> {
    fn fail(&mut self, path: &Path, err: std::io::Error) -> RegistryError {
        self.done = true;
        self.current = None;
        RegistryError::io(path, err)
    }

    fn next_type(&mut self) -> Option<Result<Leaf>> {
        let class = self.current.as_mut()?;
        loop {
            let entry = match class.types.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = class.path.clone();
                    return Some(Err(self.fail(&path, err)));
                }
            };

            let entry_path = entry.path();
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {}
                Ok(_) => continue,
                Err(err) => return Some(Err(self.fail(&entry_path, err))),
            }

            let type_name = entry.file_name().to_string_lossy().into_owned();
            tracing::debug!(class = %class.name, r#type = %type_name, "found transformer type");
            return Some(Ok(Leaf {
                class_name: class.name.clone(),
                type_name,
                config_path: entry_path.join(&self.scanner.config.config_file_name),
            }));
        }
    }

    fn next_class(&mut self) -> Option<Result<()>> {
        if self.classes.is_none() {
            match fs::read_dir(&self.scanner.root) {
                Ok(entries) => self.classes = Some(entries),
                Err(err) => {
                    let root = self.scanner.root.clone();
                    return Some(Err(self.fail(&root, err)));
                }
            }
        }

        loop {
            let classes = self.classes.as_mut()?;
            let entry = match classes.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let root = self.scanner.root.clone();
                    return Some(Err(self.fail(&root, err)));
                }
            };

            let entry_path = entry.path();
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {}
                Ok(_) => continue,
                Err(err) => return Some(Err(self.fail(&entry_path, err))),
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.scanner.config.reserved_dir {
                tracing::debug!(class = %name, "skipping reserved directory");
                continue;
            }

            let types = match fs::read_dir(&entry_path) {
                Ok(types) => types,
                Err(err) => return Some(Err(self.fail(&entry_path, err))),
            };

            tracing::debug!(class = %name, "scanning transformer class");
            self.current = Some(ClassDir {
                name,
                path: entry_path,
                types,
            });
            return Some(Ok(()));
        }
    }
}

impl Iterator for LeafIter<'_> {
    type Item = Result<Leaf>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(leaf) = self.next_type() {
                return Some(leaf);
            }
            self.current = None;

            match self.next_class() {
                Some(Ok(())) => {}
                Some(Err(err)) => return Some(Err(err)),
                None => self.done = true,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn make_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "txreg-scanner-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pairs(scanner: &DirectoryScanner) -> BTreeSet<(String, String)> {
        scanner
            .scan()
            .map(|leaf| {
                let leaf = leaf.unwrap();
                (leaf.class_name, leaf.type_name)
            })
            .collect()
    }

    #[test]
    fn finds_every_class_type_pair() {
        let root = make_temp_dir("pairs");
        std::fs::create_dir_all(root.join("generic/http_get")).unwrap();
        std::fs::create_dir_all(root.join("generic/http_post")).unwrap();
        std::fs::create_dir_all(root.join("llm/simple_retry")).unwrap();

        let scanner = DirectoryScanner::new(&root);
        let found = pairs(&scanner);

        let expected: BTreeSet<(String, String)> = [
            ("generic", "http_get"),
            ("generic", "http_post"),
            ("llm", "simple_retry"),
        ]
        .into_iter()
        .map(|(c, t)| (c.to_string(), t.to_string()))
        .collect();
        assert_eq!(found, expected);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn config_path_points_into_leaf() {
        let root = make_temp_dir("config-path");
        std::fs::create_dir_all(root.join("generic/http_get")).unwrap();

        let leaves: Vec<Leaf> = DirectoryScanner::new(&root)
            .scan()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(
            leaves[0].config_path,
            root.join("generic").join("http_get").join("config.json")
        );

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn skips_common_and_plain_files() {
        let root = make_temp_dir("skips");
        std::fs::create_dir_all(root.join("common/shared")).unwrap();
        std::fs::create_dir_all(root.join("generic/http_get")).unwrap();
        std::fs::write(root.join("README.md"), "docs").unwrap();
        std::fs::write(root.join("generic/index.ts"), "export {}").unwrap();

        let found = pairs(&DirectoryScanner::new(&root));
        assert_eq!(found.len(), 1);
        assert!(found.contains(&("generic".to_string(), "http_get".to_string())));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn common_is_only_reserved_at_class_level() {
        let root = make_temp_dir("nested-common");
        std::fs::create_dir_all(root.join("generic/common")).unwrap();

        let found = pairs(&DirectoryScanner::new(&root));
        assert!(found.contains(&("generic".to_string(), "common".to_string())));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn reserved_dir_and_file_name_are_configurable() {
        let root = make_temp_dir("configured");
        std::fs::create_dir_all(root.join("shared/util")).unwrap();
        std::fs::create_dir_all(root.join("common/http_get")).unwrap();

        let config = RegistryConfig {
            reserved_dir: "shared".to_string(),
            config_file_name: "transformer.json".to_string(),
            ..RegistryConfig::default()
        };
        let leaves: Vec<Leaf> = DirectoryScanner::with_config(&root, config)
            .scan()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].class_name, "common");
        assert!(leaves[0].config_path.ends_with("common/http_get/transformer.json"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_root_yields_nothing() {
        let root = make_temp_dir("empty");
        assert_eq!(DirectoryScanner::new(&root).scan().count(), 0);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn scan_is_restartable() {
        let root = make_temp_dir("restart");
        std::fs::create_dir_all(root.join("generic/http_get")).unwrap();

        let scanner = DirectoryScanner::new(&root);
        assert_eq!(pairs(&scanner), pairs(&scanner));

        std::fs::create_dir_all(root.join("generic/http_post")).unwrap();
        assert_eq!(pairs(&scanner).len(), 2);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_root_is_unclassified_io_error() {
        let parent = make_temp_dir("missing-root");
        let root = parent.join("does-not-exist");
        let scanner = DirectoryScanner::new(&root);
        let mut iter = scanner.scan();

        match iter.next() {
            Some(Err(err)) => {
                assert_eq!(err.kind(), crate::error::ErrorKind::Unclassified);
                assert_eq!(err.path(), Some(root.as_path()));
            }
            other => panic!("expected I/O error, got {other:?}"),
        }
        assert!(iter.next().is_none());

        let _ = std::fs::remove_dir_all(&parent);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_skipped() {
        let root = make_temp_dir("symlink");
        let outside = make_temp_dir("symlink-target");
        std::fs::create_dir_all(outside.join("http_get")).unwrap();
        std::fs::create_dir_all(root.join("generic")).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("linked")).unwrap();
        std::os::unix::fs::symlink(outside.join("http_get"), root.join("generic/http_get"))
            .unwrap();

        assert_eq!(DirectoryScanner::new(&root).scan().count(), 0);

        let _ = std::fs::remove_dir_all(&root);
        let _ = std::fs::remove_dir_all(&outside);
    }
}

//! Directory walk producing the navigation tree

use std::collections::btree_map::Entry;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::subjects::SubjectCatalog;
use crate::core::error::ScanError;
use crate::core::names::{format_name, DOCUMENT_EXTENSION};
use crate::core::node::{NavNode, Tree};

/// Subject names that matched more than one catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCollision {
    pub name: String,
    pub chosen: String,
    pub matched: Vec<String>,
}

/// Problems met during a scan. None of them abort it.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub errors: Vec<ScanError>,
    pub collisions: Vec<SubjectCollision>,
    /// Entries dropped because their display name was already taken
    pub duplicates: Vec<String>,
}

/// Walks a source directory into a [`Tree`]
#[derive(Debug, Clone)]
pub struct Scanner {
    skip_names: Vec<String>,
    subjects: SubjectCatalog,
}

impl Scanner {
    pub fn new(skip_names: Vec<String>, subjects: SubjectCatalog) -> Self {
        Self {
            skip_names,
            subjects,
        }
    }

    fn is_skipped(&self, file_name: &str) -> bool {
        file_name.starts_with('.') || self.skip_names.iter().any(|s| s == file_name)
    }

    /// Scan `dir`; document references are `base` joined with the relative path
    pub fn scan(&self, dir: &Path, base: &str, report: &mut ScanReport) -> Tree {
        self.scan_dir(dir, base, &mut Vec::new(), report)
    }

    /// `ancestors` holds the canonical paths of the directories being scanned,
    /// so a link back into one of them is not followed again
    fn scan_dir(
        &self,
        dir: &Path,
        base: &str,
        ancestors: &mut Vec<PathBuf>,
        report: &mut ScanReport,
    ) -> Tree {
        let mut items = Tree::new();

        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        if ancestors.contains(&canonical) {
            let error = ScanError {
                path: dir.to_path_buf(),
                source: io::Error::other("directory link cycle"),
            };
            tracing::warn!("Skipping: {}", error);
            report.errors.push(error);
            return items;
        }
        ancestors.push(canonical);

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    let error = ScanError {
                        path,
                        source: e.into(),
                    };
                    tracing::warn!("Skipping: {}", error);
                    report.errors.push(error);
                    continue;
                }
            };

            let file_name = entry.file_name().to_string_lossy().to_string();
            if self.is_skipped(&file_name) {
                continue;
            }

            let reference = format!("{base}/{file_name}");

            let (name, node) = if entry.file_type().is_dir() {
                let children = self.scan_dir(entry.path(), &reference, ancestors, report);
                if children.is_empty() {
                    continue;
                }
                let name = format_name(&file_name);
                let node = if self.classify(&name, report) {
                    NavNode::CardList(children)
                } else {
                    NavNode::Category(children)
                };
                (name, node)
            } else if is_document(entry.path()) {
                (format_name(&file_name), NavNode::Document(reference))
            } else {
                tracing::debug!("Skipping {}: not a document", entry.path().display());
                continue;
            };

            match items.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        "Skipping {}: name '{}' already used in {}",
                        entry.path().display(),
                        slot.key(),
                        dir.display()
                    );
                    report.duplicates.push(entry.path().display().to_string());
                }
            }
        }

        ancestors.pop();
        items
    }

    /// Whether a directory's display name is a curated subject
    fn classify(&self, name: &str, report: &mut ScanReport) -> bool {
        let Some(chosen) = self.subjects.classify(name) else {
            return false;
        };

        let matched = self.subjects.matches(name);
        if matched.len() > 1 {
            tracing::warn!(
                "'{}' matches several subjects {:?}; using '{}'",
                name,
                matched,
                chosen
            );
            report.collisions.push(SubjectCollision {
                name: name.to_string(),
                chosen: chosen.to_string(),
                matched: matched.into_iter().map(str::to_string).collect(),
            });
        }
        true
    }
}

fn is_document(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DOCUMENT_EXTENSION))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_SUBJECTS;
    use std::fs;

    fn scanner() -> Scanner {
        Scanner::new(
            vec!["node_modules".to_string()],
            SubjectCatalog::new(DEFAULT_SUBJECTS),
        )
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# x").unwrap();
    }

    #[test]
    fn test_skips_hidden_and_dependency_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".git/notes.md");
        touch(dir.path(), "node_modules/pkg/readme.md");
        touch(dir.path(), ".draft.md");
        touch(dir.path(), "rules/combat.md");
        touch(dir.path(), "rules/image.png");

        let mut report = ScanReport::default();
        let tree = scanner().scan(dir.path(), "sources", &mut report);

        assert_eq!(tree.len(), 1);
        let rules = tree["Rules"].items().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules["Combat"],
            NavNode::Document("sources/rules/combat.md".to_string())
        );
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_empty_directories_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty/deeper/still")).unwrap();
        touch(dir.path(), "assets/logo.png");

        let tree = scanner().scan(dir.path(), "sources", &mut ScanReport::default());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_subject_directories_become_card_lists() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Бестиарий/Дракон.md");
        touch(dir.path(), "rules/combat.md");

        let tree = scanner().scan(dir.path(), "sources", &mut ScanReport::default());

        let NavNode::CardList(bestiary) = &tree["Бестиарий"] else {
            panic!("expected a card list");
        };
        assert_eq!(
            bestiary["Дракон"],
            NavNode::Document("sources/Бестиарий/Дракон.md".to_string())
        );
        assert!(matches!(tree["Rules"], NavNode::Category(_)));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "star-ships.md");
        touch(dir.path(), "star_ships.md");

        let mut report = ScanReport::default();
        let tree = scanner().scan(dir.path(), "sources", &mut report);

        assert_eq!(
            tree["Star Ships"],
            NavNode::Document("sources/star-ships.md".to_string())
        );
        assert_eq!(report.duplicates.len(), 1);
    }

    #[test]
    fn test_collisions_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "магия-и-заклинания/огонь.md");

        let mut report = ScanReport::default();
        let tree = scanner().scan(dir.path(), "sources", &mut report);

        assert!(matches!(tree["Магия И Заклинания"], NavNode::CardList(_)));
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].chosen, "заклинания");
    }

    #[test]
    fn test_missing_directory_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = ScanReport::default();
        let tree = scanner().scan(&dir.path().join("absent"), "sources", &mut report);

        assert!(tree.is_empty());
        assert_eq!(report.errors.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_directories_are_followed_once() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "real/a.md");
        symlink(dir.path().join("real"), dir.path().join("linked")).unwrap();
        symlink(dir.path().join("real"), dir.path().join("real/loop")).unwrap();

        let mut report = ScanReport::default();
        let tree = scanner().scan(dir.path(), "sources", &mut report);

        let NavNode::Category(linked) = &tree["Linked"] else {
            panic!("linked directory should be a category");
        };
        assert_eq!(linked["A"], NavNode::Document("sources/linked/a.md".to_string()));
        assert!(!linked.contains_key("Loop"));
        let NavNode::Category(real) = &tree["Real"] else {
            panic!("real directory should be a category");
        };
        assert_eq!(real.len(), 1);
        assert_eq!(report.errors.len(), 2);
    }
}

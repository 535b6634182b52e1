use crate::config::FILESYSTEM_DEFINITION;
use crate::core::error::FsError;
use crate::core::path::{self, ROOT};
use crate::models::{EntryDefinition, FsDefinition, FsNode};

/// Read-only virtual filesystem.
///
/// Built once from a [`FsDefinition`] and never modified afterwards.
///
/// # Path Convention
///
/// Lookups take canonical paths as produced by [`path::resolve`]:
///
/// - Root: `"~"`
/// - File in root: `"~/about.md"`
/// - Nested file: `"~/projects/queue.md"`
#[derive(Clone, Debug)]
pub struct VirtualFs {
    root: FsNode,
}

impl VirtualFs {
    /// Create a filesystem containing only the root directory.
    pub fn empty() -> Self {
        Self {
            root: FsNode::directory(),
        }
    }

    /// Parse and build the filesystem compiled into the binary.
    pub fn builtin() -> Result<Self, FsError> {
        let definition: FsDefinition = toml::from_str(FILESYSTEM_DEFINITION)
            .map_err(|e| FsError::Parse(e.to_string()))?;
        Self::from_definition(&definition)
    }

    /// Build the tree from a definition, preserving entry order.
    pub fn from_definition(definition: &FsDefinition) -> Result<Self, FsError> {
        let mut root = FsNode::directory();
        for entry in &definition.entries {
            Self::insert(&mut root, entry)?;
        }
        Ok(Self { root })
    }

    /// Insert one definition entry, creating parent directories on the way.
    fn insert(root: &mut FsNode, entry: &EntryDefinition) -> Result<(), FsError> {
        let trimmed = entry.path.trim_end_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();
        if trimmed.is_empty() || parts.iter().any(|p| p.is_empty() || *p == "." || *p == "..") {
            return Err(FsError::InvalidPath(entry.path.clone()));
        }
        if entry.content.is_some() && entry.url.is_some() {
            return Err(FsError::AmbiguousFile(entry.path.clone()));
        }

        let Some((name, parents)) = parts.split_last() else {
            return Err(FsError::InvalidPath(entry.path.clone()));
        };

        let mut current = root;
        let mut walked = String::new();
        for part in parents {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(part);
            current = Self::child_dir_mut(current, part, &walked, &entry.path)?;
        }

        let FsNode::Directory { children } = current else {
            return Err(FsError::BlockedByFile {
                path: entry.path.clone(),
                blocker: walked,
            });
        };

        if entry.is_directory() {
            // Declaring an existing directory again is harmless
            let existing = children
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, node)| node.is_directory());
            match existing {
                Some(true) => return Ok(()),
                Some(false) => return Err(FsError::Duplicate(entry.path.clone())),
                None => children.push((name.to_string(), FsNode::directory())),
            }
        } else {
            if children.iter().any(|(n, _)| n == name) {
                return Err(FsError::Duplicate(entry.path.clone()));
            }
            children.push((
                name.to_string(),
                FsNode::File {
                    content: entry.content.clone(),
                    external_url: entry.url.clone(),
                },
            ));
        }
        Ok(())
    }

    /// Get (or create) the directory `name` below `node`.
    fn child_dir_mut<'a>(
        node: &'a mut FsNode,
        name: &str,
        walked: &str,
        full_path: &str,
    ) -> Result<&'a mut FsNode, FsError> {
        let FsNode::Directory { children } = node else {
            return Err(FsError::BlockedByFile {
                path: full_path.to_string(),
                blocker: walked.to_string(),
            });
        };

        let index = match children.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                children.push((name.to_string(), FsNode::directory()));
                children.len() - 1
            }
        };

        let child = &mut children[index].1;
        if child.is_directory() {
            Ok(child)
        } else {
            Err(FsError::BlockedByFile {
                path: full_path.to_string(),
                blocker: walked.to_string(),
            })
        }
    }

    /// Get an entry by canonical path.
    ///
    /// - `"~"` returns the root directory
    /// - `"~/projects"` returns the projects directory
    /// - anything that does not exist returns `None`
    pub fn get_entry(&self, path: &str) -> Option<&FsNode> {
        if path == ROOT {
            return Some(&self.root);
        }

        let mut current = &self.root;
        for part in path::segments(path) {
            current = current.child(part)?;
        }
        Some(current)
    }

    /// List directory children as display names, directories suffixed `/`.
    ///
    /// Returns `None` if the path does not exist or is a file.
    pub fn list_dir(&self, path: &str) -> Option<Vec<String>> {
        let children = self.get_entry(path)?.children()?;
        Some(
            children
                .iter()
                .map(|(name, node)| {
                    if node.is_directory() {
                        format!("{}/", name)
                    } else {
                        name.clone()
                    }
                })
                .collect(),
        )
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::empty()
    }
}

use serde::{Deserialize, Serialize};

// =============================================================================
// Filesystem Nodes
// =============================================================================

/// A node of the read-only virtual filesystem.
///
/// Directory children keep the order in which the static definition
/// introduced them; `ls` relies on that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsNode {
    Directory {
        children: Vec<(String, FsNode)>,
    },
    File {
        /// Inline text shown by `cat`
        content: Option<String>,
        /// External reference opened by `open`
        external_url: Option<String>,
    },
}

impl FsNode {
    /// Create an empty directory node.
    pub fn directory() -> Self {
        Self::Directory {
            children: Vec::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Look up a direct child by name. Files have no children.
    pub fn child(&self, name: &str) -> Option<&FsNode> {
        match self {
            Self::Directory { children } => children
                .iter()
                .find(|(child_name, _)| child_name == name)
                .map(|(_, node)| node),
            Self::File { .. } => None,
        }
    }

    /// Children in definition order, or `None` for files.
    pub fn children(&self) -> Option<&[(String, FsNode)]> {
        match self {
            Self::Directory { children } => Some(children),
            Self::File { .. } => None,
        }
    }

    /// External url of a file, if any.
    pub fn external_url(&self) -> Option<&str> {
        match self {
            Self::File { external_url, .. } => external_url.as_deref(),
            Self::Directory { .. } => None,
        }
    }
}

// =============================================================================
// Static Definition
// =============================================================================

/// Root of the static filesystem definition (`assets/filesystem.toml`).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FsDefinition {
    /// Entries in display order. Parent directories are created on first use.
    #[serde(default, rename = "entry")]
    pub entries: Vec<EntryDefinition>,
}

/// A single entry of the definition.
///
/// An entry with neither `content` nor `url` and a trailing `/` in its path
/// declares an (possibly empty) directory.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntryDefinition {
    /// Path relative to the root, e.g. `projects/queue.md`
    pub path: String,
    /// Inline file content
    #[serde(default)]
    pub content: Option<String>,
    /// External reference for `open`
    #[serde(default)]
    pub url: Option<String>,
}

impl EntryDefinition {
    pub fn is_directory(&self) -> bool {
        self.path.ends_with('/') && self.content.is_none() && self.url.is_none()
    }
}

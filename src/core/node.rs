//! Navigation tree model shared by the manifest compiler and the viewer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Children of a group, keyed by display name
pub type Tree = BTreeMap<String, NavNode>;

/// One entry of the compiled site tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum NavNode {
    /// Leaf referencing fetchable markdown source, relative to the site root
    Document(String),
    /// Collapsible sidebar branch
    Category(Tree),
    /// Sidebar leaf whose children are shown as a card grid
    CardList(Tree),
}

impl NavNode {
    /// Children of a group node, `None` for documents
    pub fn items(&self) -> Option<&Tree> {
        match self {
            NavNode::Document(_) => None,
            NavNode::Category(items) | NavNode::CardList(items) => Some(items),
        }
    }

    pub fn is_group(&self) -> bool {
        self.items().is_some()
    }
}

/// Look up a node by its path of display names from the root
pub fn node_at<'a, S: AsRef<str>>(tree: &'a Tree, path: &[S]) -> Option<&'a NavNode> {
    let (first, rest) = path.split_first()?;
    let node = tree.get(first.as_ref())?;
    if rest.is_empty() {
        return Some(node);
    }
    node_at(node.items()?, rest)
}

/// Wire shape: documents are bare strings, groups carry a `type` tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Document(String),
    Group(RawGroup),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "items")]
enum RawGroup {
    #[serde(rename = "folder")]
    Category(Tree),
    #[serde(rename = "card-list")]
    CardList(Tree),
}

impl From<RawNode> for NavNode {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Document(reference) => NavNode::Document(reference),
            RawNode::Group(RawGroup::Category(items)) => NavNode::Category(items),
            RawNode::Group(RawGroup::CardList(items)) => NavNode::CardList(items),
        }
    }
}

impl From<NavNode> for RawNode {
    fn from(node: NavNode) -> Self {
        match node {
            NavNode::Document(reference) => RawNode::Document(reference),
            NavNode::Category(items) => RawNode::Group(RawGroup::Category(items)),
            NavNode::CardList(items) => RawNode::Group(RawGroup::CardList(items)),
        }
    }
}

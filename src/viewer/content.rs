//! Main display state and the rendered-document cache

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::node::{NavNode, Tree};

/// A fetched document: its markdown source and rendered HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub reference: String,
    pub source: String,
    pub html: String,
    /// Markdown for the in-app preview, bare URLs already linked
    pub display: String,
}

/// Rendered documents by reference, kept for the whole session
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<String, Arc<RenderedDocument>>,
}

impl ContentCache {
    pub fn get(&self, reference: &str) -> Option<Arc<RenderedDocument>> {
        self.entries.get(reference).cloned()
    }

    pub fn insert(&mut self, document: RenderedDocument) -> Arc<RenderedDocument> {
        let document = Arc::new(document);
        self.entries
            .insert(document.reference.clone(), Arc::clone(&document));
        document
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One clickable card of a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    /// Display-name path from the root of the tree
    pub path: Vec<String>,
}

/// What the main area currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MainView {
    #[default]
    Welcome,
    Document {
        document: Arc<RenderedDocument>,
        anchor: Option<String>,
        /// Where the anchor's heading starts in `document.display`
        offset: Option<usize>,
    },
    Cards {
        title: String,
        cards: Vec<Card>,
    },
    Error(String),
}

/// Something a click or a route can put into the main area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTarget {
    Document(String),
    Cards { title: String, cards: Vec<Card> },
}

impl ContentTarget {
    /// Target for the node found at `path`
    pub fn for_node(path: &[String], node: &NavNode) -> Self {
        match node {
            NavNode::Document(reference) => ContentTarget::Document(reference.clone()),
            NavNode::Category(items) | NavNode::CardList(items) => ContentTarget::Cards {
                title: path.last().cloned().unwrap_or_default(),
                cards: cards(path, items),
            },
        }
    }
}

fn cards(path: &[String], items: &Tree) -> Vec<Card> {
    items
        .keys()
        .map(|name| {
            let mut card_path = path.to_vec();
            card_path.push(name.clone());
            Card {
                name: name.clone(),
                path: card_path,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_list_target() {
        let mut items = Tree::new();
        items.insert("Mechanic".into(), NavNode::Document("classes/mechanic.md".into()));
        let path = vec!["Classes".to_string()];

        let target = ContentTarget::for_node(&path, &NavNode::CardList(items));
        assert_eq!(
            target,
            ContentTarget::Cards {
                title: "Classes".into(),
                cards: vec![Card {
                    name: "Mechanic".into(),
                    path: vec!["Classes".into(), "Mechanic".into()],
                }],
            }
        );
    }

    #[test]
    fn test_cache_shares_entries() {
        let mut cache = ContentCache::default();
        let stored = cache.insert(RenderedDocument {
            reference: "a.md".into(),
            source: "# A".into(),
            html: "<h1>A</h1>\n".into(),
            display: "# A".into(),
        });

        let hit = cache.get("a.md").unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("b.md").is_none());
    }
}

//! Build statistics reported to the operator

use crate::core::node::{NavNode, Tree};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestStats {
    pub documents: usize,
    pub categories: usize,
    pub card_lists: usize,
    /// Top-level group names
    pub sections: Vec<String>,
}

impl ManifestStats {
    pub fn collect(tree: &Tree) -> Self {
        let mut stats = Self {
            sections: tree
                .iter()
                .filter(|(_, node)| node.is_group())
                .map(|(name, _)| name.clone())
                .collect(),
            ..Self::default()
        };
        stats.count(tree);
        stats
    }

    fn count(&mut self, tree: &Tree) {
        for node in tree.values() {
            match node {
                NavNode::Document(_) => self.documents += 1,
                NavNode::Category(items) => {
                    self.categories += 1;
                    self.count(items);
                }
                NavNode::CardList(items) => {
                    self.card_lists += 1;
                    self.count(items);
                }
            }
        }
    }

    pub fn groups(&self) -> usize {
        self.categories + self.card_lists
    }

    pub fn log(&self) {
        tracing::info!(
            documents = self.documents,
            categories = self.categories,
            card_lists = self.card_lists,
            "Manifest statistics"
        );
        tracing::info!("Top-level sections: {}", self.sections.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_nested_groups() {
        let mut inner = Tree::new();
        inner.insert("Vampire".into(), NavNode::Document("a.md".into()));
        inner.insert("Dragon".into(), NavNode::Document("b.md".into()));
        let mut nested = Tree::new();
        nested.insert("Undead".into(), NavNode::Category(inner));
        let mut tree = Tree::new();
        tree.insert("Bestiary".into(), NavNode::CardList(nested));
        tree.insert("Skills".into(), NavNode::Document("c.md".into()));

        let stats = ManifestStats::collect(&tree);
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.categories, 1);
        assert_eq!(stats.card_lists, 1);
        assert_eq!(stats.groups(), 2);
        assert_eq!(stats.sections, vec!["Bestiary".to_string()]);
    }
}

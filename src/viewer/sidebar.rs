//! Sidebar render tree.
//!
//! [`Sidebar::build`] is a pure function of the navigation tree and the
//! open-state. Selection, toggling and search filtering mutate only this
//! model; the egui layer reads it and reports clicks as [`SidebarAction`]s.

use crate::core::node::{NavNode, Tree};
use crate::viewer::open_state::OpenState;

/// User interaction reported by the sidebar widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    /// Section header clicked
    Toggle(Vec<String>),
    /// Leaf clicked
    Activate(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafKind {
    Document(String),
    CardList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub name: String,
    pub path: Vec<String>,
    pub kind: LeafKind,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub depth: usize,
    pub path: Vec<String>,
    /// Persisted state
    pub open: bool,
    /// Expanded by an active search match
    pub forced_open: bool,
    pub visible: bool,
    pub children: Vec<SidebarItem>,
}

impl Section {
    pub fn is_expanded(&self) -> bool {
        self.open || self.forced_open
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Leaf(Leaf),
    Section(Section),
}

impl SidebarItem {
    pub fn name(&self) -> &str {
        match self {
            SidebarItem::Leaf(leaf) => &leaf.name,
            SidebarItem::Section(section) => &section.name,
        }
    }

    pub fn path(&self) -> &[String] {
        match self {
            SidebarItem::Leaf(leaf) => &leaf.path,
            SidebarItem::Section(section) => &section.path,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            SidebarItem::Leaf(leaf) => leaf.visible,
            SidebarItem::Section(section) => section.visible,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    items: Vec<SidebarItem>,
    selected: Option<Vec<String>>,
    query: String,
}

impl Sidebar {
    pub fn build(tree: &Tree, open_state: &OpenState) -> Self {
        Self {
            items: build_items(tree, open_state, &[]),
            selected: None,
            query: String::new(),
        }
    }

    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<&[String]> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, path: &[String]) -> bool {
        self.selected.as_deref() == Some(path)
    }

    /// Make the leaf at `path` the single selected element.
    /// Paths that are not sidebar leaves leave the selection unchanged.
    pub fn select(&mut self, path: &[String]) -> bool {
        match find(&self.items, path) {
            Some(SidebarItem::Leaf(_)) => {
                self.selected = Some(path.to_vec());
                true
            }
            _ => false,
        }
    }

    pub fn section(&self, path: &[String]) -> Option<&Section> {
        match find(&self.items, path)? {
            SidebarItem::Section(section) => Some(section),
            SidebarItem::Leaf(_) => None,
        }
    }

    /// Flip the section's visible state; returns `(name, depth, open)` to persist
    pub fn toggle(&mut self, path: &[String]) -> Option<(String, usize, bool)> {
        let section = find_section_mut(&mut self.items, path)?;
        section.open = !section.is_expanded();
        section.forced_open = false;
        Some((section.name.clone(), section.depth, section.open))
    }

    /// Show only entries whose names contain `query`; empty resets everything
    pub fn filter(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
        apply_filter(&mut self.items, &self.query);
    }
}

fn build_items(tree: &Tree, open_state: &OpenState, parent: &[String]) -> Vec<SidebarItem> {
    let depth = parent.len();
    tree.iter()
        .map(|(name, node)| {
            let mut path = parent.to_vec();
            path.push(name.clone());
            match node {
                NavNode::Document(reference) => SidebarItem::Leaf(Leaf {
                    name: name.clone(),
                    path,
                    kind: LeafKind::Document(reference.clone()),
                    visible: true,
                }),
                NavNode::CardList(_) => SidebarItem::Leaf(Leaf {
                    name: name.clone(),
                    path,
                    kind: LeafKind::CardList,
                    visible: true,
                }),
                NavNode::Category(items) => SidebarItem::Section(Section {
                    name: name.clone(),
                    depth,
                    open: open_state.is_open(name, depth),
                    forced_open: false,
                    visible: true,
                    children: build_items(items, open_state, &path),
                    path,
                }),
            }
        })
        .collect()
}

fn find<'a>(items: &'a [SidebarItem], path: &[String]) -> Option<&'a SidebarItem> {
    let (first, rest) = path.split_first()?;
    let item = items.iter().find(|item| item.name() == first)?;
    match (item, rest.is_empty()) {
        (_, true) => Some(item),
        (SidebarItem::Section(section), false) => find(&section.children, rest),
        (SidebarItem::Leaf(_), false) => None,
    }
}

fn find_section_mut<'a>(items: &'a mut [SidebarItem], path: &[String]) -> Option<&'a mut Section> {
    let (first, rest) = path.split_first()?;
    let item = items.iter_mut().find(|item| item.name() == first)?;
    let SidebarItem::Section(section) = item else {
        return None;
    };
    if rest.is_empty() {
        Some(section)
    } else {
        find_section_mut(&mut section.children, rest)
    }
}

/// Returns whether any item at this level ended up visible
fn apply_filter(items: &mut [SidebarItem], query: &str) -> bool {
    let mut any_visible = false;
    for item in items.iter_mut() {
        let visible = match item {
            SidebarItem::Leaf(leaf) => {
                leaf.visible = query.is_empty() || leaf.name.to_lowercase().contains(query);
                leaf.visible
            }
            SidebarItem::Section(section) => {
                let child_match = apply_filter(&mut section.children, query);
                if query.is_empty() {
                    section.visible = true;
                    section.forced_open = false;
                } else {
                    let hit = child_match || section.name.to_lowercase().contains(query);
                    section.visible = hit;
                    section.forced_open = hit;
                }
                section.visible
            }
        };
        any_visible |= visible;
    }
    any_visible
}

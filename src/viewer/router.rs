//! Route parsing, resolution against the tree, and navigation history

use std::fmt;

use crate::core::names::{segment_matches, slug};
use crate::core::node::{NavNode, Tree};

/// A `/`-separated path of name slugs with an optional `#anchor`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub segments: Vec<String>,
    pub anchor: Option<String>,
}

impl Route {
    pub fn parse(raw: &str) -> Self {
        let (path, anchor) = match raw.split_once('#') {
            Some((path, anchor)) => (path, Some(anchor).filter(|a| !a.is_empty())),
            None => (raw, None),
        };
        let segments = match path.trim_matches('/') {
            "" | "index.html" => Vec::new(),
            path => path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        };
        Self {
            segments,
            anchor: anchor.map(str::to_string),
        }
    }

    /// Route addressing the node at a display-name path
    pub fn for_path(names: &[String]) -> Self {
        Self {
            segments: names.iter().map(|name| slug(name)).collect(),
            anchor: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        if let Some(anchor) = &self.anchor {
            write!(f, "#{anchor}")?;
        }
        Ok(())
    }
}

/// Walk the tree along the route; returns the display-name path and the node
pub fn resolve<'a>(tree: &'a Tree, route: &Route) -> Option<(Vec<String>, &'a NavNode)> {
    let (last, parents) = route.segments.split_last()?;
    let mut level = tree;
    let mut names = Vec::with_capacity(route.segments.len());

    for segment in parents {
        let (name, node) = find_child(level, segment)?;
        names.push(name.clone());
        level = node.items()?;
    }

    let (name, node) = find_child(level, last)?;
    names.push(name.clone());
    Some((names, node))
}

fn find_child<'a>(level: &'a Tree, segment: &str) -> Option<(&'a String, &'a NavNode)> {
    level.iter().find(|(name, _)| segment_matches(segment, name))
}

/// Back/forward stack of visited routes
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl History {
    pub fn current(&self) -> Option<&Route> {
        self.entries.get(self.cursor)
    }

    /// Push a route, dropping any forward entries
    pub fn push(&mut self, route: Route) {
        if self.current() == Some(&route) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
            self.cursor += 1;
        }
        self.entries.push(route);
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }
}

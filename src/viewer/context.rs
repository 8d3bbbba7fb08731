//! Viewer application context: owns the tree and all view state

use crate::compiler::artifact::parse_artifact;
use crate::core::error::{FetchError, ManifestError, ViewerError};
use crate::core::node::{node_at, Tree};
use crate::core::storage::KeyValueStore;
use crate::viewer::content::{ContentCache, ContentTarget, MainView, RenderedDocument};
use crate::viewer::fetch::Fetch;
use crate::viewer::markdown::{anchor_offset, autolink, Render};
use crate::viewer::open_state::OpenState;
use crate::viewer::router::{resolve, History, Route};
use crate::viewer::sidebar::{Sidebar, SidebarAction};

pub struct ViewerContext {
    tree: Tree,
    renderer: Box<dyn Render>,
    fetcher: Box<dyn Fetch>,
    store: Box<dyn KeyValueStore>,
    open_state: OpenState,
    cache: ContentCache,
    sidebar: Sidebar,
    history: History,
    view: MainView,
    /// Heading offset the preview has not scrolled to yet
    pending_scroll: Option<usize>,
}

impl ViewerContext {
    /// Build a context around an already loaded tree
    pub fn new(
        tree: Tree,
        renderer: Option<Box<dyn Render>>,
        fetcher: Box<dyn Fetch>,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, ViewerError> {
        let renderer = renderer.ok_or(ViewerError::RenderUnavailable)?;
        let open_state = OpenState::load(store.as_ref());
        let sidebar = Sidebar::build(&tree, &open_state);

        Ok(Self {
            tree,
            renderer,
            fetcher,
            store,
            open_state,
            cache: ContentCache::default(),
            sidebar,
            history: History::default(),
            view: MainView::Welcome,
            pending_scroll: None,
        })
    }

    /// Fetch and parse the manifest, then build the context
    pub fn load(
        manifest_reference: &str,
        renderer: Option<Box<dyn Render>>,
        fetcher: Box<dyn Fetch>,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, ViewerError> {
        let text = fetcher
            .fetch(manifest_reference)
            .map_err(ManifestError::from)?;
        let tree = parse_artifact(&text)?;
        tracing::info!("Loaded manifest {} ({} top-level entries)", manifest_reference, tree.len());
        Self::new(tree, renderer, fetcher, store)
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn view(&self) -> &MainView {
        &self.view
    }

    pub fn open_state(&self) -> &OpenState {
        &self.open_state
    }

    pub fn cached_documents(&self) -> usize {
        self.cache.len()
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.history.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Heading offset to scroll to, handed out once per navigation
    pub fn take_scroll(&mut self) -> Option<usize> {
        self.pending_scroll.take()
    }

    /// Apply an interaction reported by the sidebar widget
    pub fn handle(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::Toggle(path) => self.toggle(&path),
            SidebarAction::Activate(path) => self.activate(&path),
        }
    }

    /// Collapse or expand a section and persist the new state
    pub fn toggle(&mut self, path: &[String]) {
        let Some((name, depth, open)) = self.sidebar.toggle(path) else {
            return;
        };
        if let Err(e) = self
            .open_state
            .set(&name, depth, open, self.store.as_mut())
        {
            tracing::warn!("Failed to persist sidebar state: {}", e);
        }
    }

    /// Sidebar leaf click: select it, record the route, dispatch
    pub fn activate(&mut self, path: &[String]) {
        self.sidebar.select(path);
        self.history.push(Route::for_path(path));
        self.dispatch(path, None);
    }

    /// Card click: record the route and dispatch like a sidebar click
    pub fn open_card(&mut self, path: &[String]) {
        self.history.push(Route::for_path(path));
        self.dispatch(path, None);
    }

    pub fn filter(&mut self, query: &str) {
        self.sidebar.filter(query);
    }

    /// Navigate to a typed or deep-linked route
    pub fn navigate(&mut self, raw: &str) {
        let route = Route::parse(raw);
        self.history.push(route.clone());
        self.show_route(&route);
    }

    pub fn back(&mut self) {
        if let Some(route) = self.history.back().cloned() {
            self.show_route(&route);
        }
    }

    pub fn forward(&mut self) {
        if let Some(route) = self.history.forward().cloned() {
            self.show_route(&route);
        }
    }

    fn show_route(&mut self, route: &Route) {
        if route.is_root() {
            self.view = MainView::Welcome;
            return;
        }
        let Some((path, _)) = resolve(&self.tree, route) else {
            tracing::debug!("No entry for route {}", route);
            return;
        };
        self.sidebar.select(&path);
        self.dispatch(&path, route.anchor.clone());
    }

    fn dispatch(&mut self, path: &[String], anchor: Option<String>) {
        let Some(node) = node_at(&self.tree, path) else {
            tracing::debug!("No entry at {:?}", path);
            return;
        };
        let target = ContentTarget::for_node(path, node);
        self.load_content(target, anchor);
    }

    /// Show a document (cached, or fetched and rendered) or a card grid
    pub fn load_content(&mut self, target: ContentTarget, anchor: Option<String>) {
        self.pending_scroll = None;
        self.view = match target {
            ContentTarget::Cards { title, cards } => MainView::Cards { title, cards },
            ContentTarget::Document(reference) => match self.document(&reference) {
                Ok(document) => {
                    let offset = anchor
                        .as_deref()
                        .and_then(|anchor| anchor_offset(&document.display, anchor));
                    if let (Some(anchor), None) = (&anchor, offset) {
                        tracing::debug!("No heading for #{} in {}", anchor, reference);
                    }
                    self.pending_scroll = offset;
                    MainView::Document {
                        document,
                        anchor,
                        offset,
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to load {}: {}", reference, e);
                    MainView::Error(format!("Failed to load: {e}"))
                }
            },
        };
    }

    fn document(&mut self, reference: &str) -> Result<std::sync::Arc<RenderedDocument>, FetchError> {
        if let Some(document) = self.cache.get(reference) {
            tracing::debug!("Cache hit: {}", reference);
            return Ok(document);
        }

        let source = self.fetcher.fetch(reference)?;
        let html = self.renderer.render(&source);
        tracing::debug!("Rendered {} ({} bytes)", reference, html.len());

        Ok(self.cache.insert(RenderedDocument {
            reference: reference.to_string(),
            display: autolink(&source),
            source,
            html,
        }))
    }
}

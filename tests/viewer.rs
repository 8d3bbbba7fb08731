use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use tempfile::TempDir;

use starcodex::compiler::artifact::parse_artifact;
use starcodex::core::error::{FetchError, ViewerError};
use starcodex::core::storage::MemoryStore;
use starcodex::viewer::content::MainView;
use starcodex::viewer::fetch::{Fetch, FsFetcher};
use starcodex::viewer::markdown::MarkdownRenderer;
use starcodex::viewer::open_state::OpenState;
use starcodex::viewer::sidebar::{Sidebar, SidebarItem};
use starcodex::viewer::ViewerContext;

/// Counts fetches while delegating to the filesystem
struct CountingFetcher {
    inner: FsFetcher,
    calls: Arc<AtomicUsize>,
}

impl Fetch for CountingFetcher {
    fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(reference)
    }
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("classes")).unwrap();
    fs::write(
        dir.path().join("classes/mechanic.md"),
        "# Mechanic\n\n| Level | Feature |\n|---|---|\n| 1 | Drone |\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("structure.js"),
        "// Generated: 2025-01-01T00:00:00.000Z\n\n\
         const structure = {\"Classes\": {\"type\": \"card-list\", \"items\": {\"Mechanic\": \"classes/mechanic.md\"}}};\n\n\
         if (typeof window !== 'undefined') {\n  window.structure = structure;\n}\n",
    )
    .unwrap();
    dir
}

fn open(dir: &TempDir) -> (ViewerContext, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = CountingFetcher {
        inner: FsFetcher::new(dir.path()),
        calls: Arc::clone(&calls),
    };
    let ctx = ViewerContext::load(
        "structure.js",
        Some(Box::new(MarkdownRenderer::new())),
        Box::new(fetcher),
        Box::new(MemoryStore::default()),
    )
    .unwrap();
    // The manifest itself went through the fetcher
    calls.store(0, Ordering::SeqCst);
    (ctx, calls)
}

#[test]
fn clicking_classes_then_mechanic_shows_rendered_document() {
    let dir = site();
    let (mut ctx, calls) = open(&dir);

    ctx.activate(&["Classes".to_string()]);
    let MainView::Cards { title, cards } = ctx.view().clone() else {
        panic!("expected a card grid");
    };
    assert_eq!(title, "Classes");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Mechanic");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    ctx.open_card(&cards[0].path);
    let MainView::Document { document, .. } = ctx.view() else {
        panic!("expected a document");
    };
    assert_eq!(document.reference, "classes/mechanic.md");
    assert!(document.html.contains("<h1>Mechanic</h1>"));
    assert!(document.html.contains("<div class=\"table-container\"><table class=\"markdown-table\">"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.current_route().unwrap().to_string(), "/classes/mechanic");
}

#[test]
fn repeated_loads_fetch_once_and_render_identically() {
    let dir = site();
    let (mut ctx, calls) = open(&dir);

    ctx.navigate("/classes/mechanic");
    let first = ctx.view().clone();
    ctx.navigate("/classes");
    ctx.navigate("/Classes/MECHANIC");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    match (&first, ctx.view()) {
        (MainView::Document { document: a, .. }, MainView::Document { document: b, .. }) => {
            assert_eq!(a.html.as_bytes(), b.html.as_bytes());
        }
        other => panic!("unexpected views {other:?}"),
    }
}

#[test]
fn missing_document_shows_inline_error() {
    let dir = site();
    fs::remove_file(dir.path().join("classes/mechanic.md")).unwrap();
    let (mut ctx, _) = open(&dir);

    ctx.navigate("/classes/mechanic");
    assert!(matches!(ctx.view(), MainView::Error(msg) if msg.contains("classes/mechanic.md")));
}

#[test]
fn missing_manifest_fails_initialization() {
    let dir = TempDir::new().unwrap();
    let result = ViewerContext::load(
        "structure.js",
        Some(Box::new(MarkdownRenderer::new())),
        Box::new(FsFetcher::new(dir.path())),
        Box::new(MemoryStore::default()),
    );
    assert!(matches!(result, Err(ViewerError::Manifest(_))));
}

const MANIFEST: &str = r#"{
    "Rules": {"type": "folder", "items": {
        "Combat": {"type": "folder", "items": {
            "Cover": "rules/cover.md",
            "Initiative": "rules/initiative.md"
        }},
        "Stealth": "rules/stealth.md"
    }},
    "Equipment": {"type": "folder", "items": {
        "Weapons": {"type": "card-list", "items": {"Laser Pistol": "eq/laser.md"}},
        "Armor": "eq/armor.md"
    }},
    "Skills": "skills.md"
}"#;

fn visibility(items: &[SidebarItem], out: &mut Vec<(String, bool, bool)>) {
    for item in items {
        match item {
            SidebarItem::Leaf(leaf) => out.push((leaf.name.clone(), leaf.visible, false)),
            SidebarItem::Section(section) => {
                out.push((section.name.clone(), section.visible, section.is_expanded()));
                visibility(&section.children, out);
            }
        }
    }
}

proptest! {
    #[test]
    fn empty_query_restores_everything(
        queries in prop::collection::vec("[a-zA-Z ]{0,6}", 1..5),
        collapse in prop::collection::vec(any::<bool>(), 3),
    ) {
        let tree = parse_artifact(MANIFEST).unwrap();
        let mut sidebar = Sidebar::build(&tree, &OpenState::default());
        let sections = [
            vec!["Rules".to_string()],
            vec!["Rules".to_string(), "Combat".to_string()],
            vec!["Equipment".to_string()],
        ];
        for (path, collapse) in sections.iter().zip(&collapse) {
            if *collapse {
                sidebar.toggle(path);
            }
        }

        let mut before = Vec::new();
        visibility(sidebar.items(), &mut before);

        for query in &queries {
            sidebar.filter(query);
        }
        sidebar.filter("");

        let mut after = Vec::new();
        visibility(sidebar.items(), &mut after);
        prop_assert_eq!(&after, &before);
        prop_assert!(after.iter().all(|(_, visible, _)| *visible));
    }
}

//! Main application state and UI coordination

use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui;

use starcodex::core::config::AppConfig;
use starcodex::core::storage::FileStore;
use starcodex::viewer::content::MainView;
use starcodex::viewer::fetch::FsFetcher;
use starcodex::viewer::markdown::{html_page, MarkdownRenderer};
use starcodex::viewer::ViewerContext;

use crate::ui::{preview::PreviewPanel, sidebar::SidebarPanel};

/// Main application state
pub struct StarcodexApp {
    /// Application configuration
    pub config: AppConfig,
    /// Loaded site; `None` while initialization has failed
    pub viewer: Option<ViewerContext>,
    /// Blocking initialization error
    pub init_error: Option<String>,
    /// Sidebar search text
    pub search_query: String,
    /// Request keyboard focus for the search box on the next frame
    pub focus_search: bool,
    /// Whether sidebar is visible
    pub sidebar_visible: bool,
    /// Commonmark cache for preview
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Last "Open in Browser" failure
    pub status: Option<String>,
}

impl StarcodexApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, initial_route: Option<String>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_default();
        if config.ui.theme == "light" {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        let mut app = Self {
            config,
            viewer: None,
            init_error: None,
            search_query: String::new(),
            focus_search: false,
            sidebar_visible: true,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            status: None,
        };
        app.reload();

        if let (Some(viewer), Some(route)) = (app.viewer.as_mut(), initial_route) {
            viewer.navigate(&route);
        }
        app
    }

    /// (Re)load the manifest of the current site root
    pub fn reload(&mut self) {
        let site_root = self.config.site_root();
        tracing::info!("Opening site {}", site_root.display());

        let result = ViewerContext::load(
            &self.config.manifest_file,
            Some(Box::new(MarkdownRenderer::new())),
            Box::new(FsFetcher::new(site_root)),
            Box::new(FileStore::open(&AppConfig::state_path())),
        );

        match result {
            Ok(mut viewer) => {
                viewer.filter(&self.search_query);
                self.viewer = Some(viewer);
                self.init_error = None;
            }
            Err(e) => {
                tracing::error!("Initialization failed: {}", e);
                self.viewer = None;
                self.init_error = Some(e.to_string());
            }
        }
    }

    /// Switch to another site root
    pub fn open_site(&mut self, path: PathBuf) {
        self.config.site_root = Some(path.clone());
        self.config.add_recent_site(path);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
        self.reload();
    }

    /// Write the current document's HTML to the cache dir and open it
    fn open_in_browser(&self) -> Result<()> {
        let Some(MainView::Document { document, .. }) = self.viewer.as_ref().map(|v| v.view()) else {
            return Ok(());
        };

        let dir = AppConfig::export_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.html", document.reference.replace(['/', '\\'], "_")));
        std::fs::write(&path, html_page(&document.reference, &document.html))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(())
    }

    /// Render the top bar: history, route, site actions
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (can_back, can_forward, route) = match &self.viewer {
                    Some(viewer) => (
                        viewer.can_go_back(),
                        viewer.can_go_forward(),
                        viewer.current_route().map(|r| r.to_string()).unwrap_or_else(|| "/".into()),
                    ),
                    None => (false, false, String::new()),
                };

                if ui.add_enabled(can_back, egui::Button::new("\u{2190}")).on_hover_text("Back").clicked() {
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.back();
                    }
                }
                if ui.add_enabled(can_forward, egui::Button::new("\u{2192}")).on_hover_text("Forward").clicked() {
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.forward();
                    }
                }
                ui.monospace(route);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Open in Browser").clicked() {
                        self.status = self.open_in_browser().err().map(|e| e.to_string());
                    }
                    if ui.button("\u{21BB}").on_hover_text("Reload").clicked() {
                        self.reload();
                    }
                    if ui.button("Open Site...").clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_folder() {
                            self.open_site(path);
                        }
                    }
                    if let Some(status) = &self.status {
                        ui.colored_label(ui.visuals().error_fg_color, status.as_str());
                    }
                });
            });
        });
    }

    /// Blocking error screen with a manual reload
    fn render_init_error(&mut self, ui: &mut egui::Ui, error: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading("Starcodex could not start");
            ui.add_space(10.0);
            ui.colored_label(ui.visuals().error_fg_color, error);
            ui.add_space(20.0);
            if ui.button("Reload").clicked() {
                self.reload();
            }
        });
    }
}

impl eframe::App for StarcodexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::B) {
                self.sidebar_visible = !self.sidebar_visible;
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::F) {
                self.sidebar_visible = true;
                self.focus_search = true;
            }
            if let Some(viewer) = self.viewer.as_mut() {
                if i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft) {
                    viewer.back();
                }
                if i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight) {
                    viewer.forward();
                }
            }
        });

        self.render_top_bar(ctx);

        if let Some(error) = self.init_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.render_init_error(ui, &error);
            });
            return;
        }

        if self.sidebar_visible {
            egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.config.ui.sidebar_width)
                .min_width(150.0)
                .show(ctx, |ui| {
                    SidebarPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            PreviewPanel::show(ui, self);
        });
    }
}

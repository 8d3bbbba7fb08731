//! Sidebar panel: search box and the navigation tree

use eframe::egui;

use starcodex::viewer::sidebar::{LeafKind, Sidebar, SidebarAction, SidebarItem};

use crate::app::StarcodexApp;

/// Sidebar with search and navigation tree
pub struct SidebarPanel;

impl SidebarPanel {
    /// Show the sidebar and apply the clicks it collected
    pub fn show(ui: &mut egui::Ui, app: &mut StarcodexApp) {
        let Some(viewer) = app.viewer.as_mut() else {
            return;
        };

        ui.vertical(|ui| {
            let mut query_changed = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut app.search_query)
                        .hint_text("Search...")
                        .desired_width(ui.available_width() - 28.0),
                );
                if app.focus_search {
                    response.request_focus();
                    app.focus_search = false;
                }
                query_changed |= response.changed();

                let escape = (response.has_focus() || response.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Escape));
                let clear = !app.search_query.is_empty()
                    && ui.button("\u{2715}").on_hover_text("Clear search").clicked();
                if escape || clear {
                    app.search_query.clear();
                    query_changed = true;
                }
            });
            if query_changed {
                viewer.filter(&app.search_query);
            }

            ui.separator();

            let mut actions = Vec::new();
            egui::ScrollArea::vertical()
                .id_salt("sidebar_scroll")
                .show(ui, |ui| {
                    let sidebar = viewer.sidebar();
                    if sidebar.items().is_empty() {
                        ui.label("Structure not found");
                    }
                    Self::show_items(ui, sidebar.items(), sidebar, &mut actions);
                });

            for action in actions {
                viewer.handle(action);
            }
        });
    }

    /// Recursively show visible items
    fn show_items(
        ui: &mut egui::Ui,
        items: &[SidebarItem],
        sidebar: &Sidebar,
        actions: &mut Vec<SidebarAction>,
    ) {
        for item in items.iter().filter(|item| item.is_visible()) {
            match item {
                SidebarItem::Leaf(leaf) => {
                    let icon = match leaf.kind {
                        LeafKind::Document(_) => "\u{1F4DD}",
                        LeafKind::CardList => "\u{1F5C2}",
                    };
                    let selected = sidebar.is_selected(&leaf.path);
                    if ui
                        .selectable_label(selected, format!("{} {}", icon, leaf.name))
                        .clicked()
                    {
                        actions.push(SidebarAction::Activate(leaf.path.clone()));
                    }
                }
                SidebarItem::Section(section) => {
                    let chevron = if section.is_expanded() { "\u{25BC}" } else { "\u{25B6}" };
                    if ui
                        .selectable_label(false, format!("{} {}", chevron, section.name))
                        .clicked()
                    {
                        actions.push(SidebarAction::Toggle(section.path.clone()));
                    }
                    if section.is_expanded() {
                        ui.indent(section.path.join("/"), |ui| {
                            Self::show_items(ui, &section.children, sidebar, actions);
                        });
                    }
                }
            }
        }
    }
}

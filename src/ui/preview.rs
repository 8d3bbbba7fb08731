//! Main content area: document preview, card grid, errors

use eframe::egui;
use egui_commonmark::CommonMarkViewer;

use starcodex::viewer::content::{Card, MainView};

use crate::app::StarcodexApp;

/// Main content panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the current main view
    pub fn show(ui: &mut egui::Ui, app: &mut StarcodexApp) {
        let Some(view) = app.viewer.as_ref().map(|viewer| viewer.view().clone()) else {
            return;
        };

        let scroll = app.viewer.as_mut().and_then(|viewer| viewer.take_scroll()).is_some();
        let mut opened: Option<Vec<String>> = None;

        egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .show(ui, |ui| match &view {
                MainView::Welcome => Self::show_empty(ui),
                MainView::Document { document, offset, .. } => match offset {
                    Some(offset) => {
                        let (before, after) = document.display.split_at(*offset);
                        CommonMarkViewer::new().show(ui, &mut app.commonmark_cache, before);
                        let marker = ui.allocate_response(egui::Vec2::ZERO, egui::Sense::hover());
                        if scroll {
                            marker.scroll_to_me(Some(egui::Align::TOP));
                        }
                        CommonMarkViewer::new().show(ui, &mut app.commonmark_cache, after);
                    }
                    None => {
                        CommonMarkViewer::new().show(ui, &mut app.commonmark_cache, &document.display);
                    }
                },
                MainView::Cards { title, cards } => {
                    opened = Self::show_cards(ui, title, cards);
                }
                MainView::Error(message) => {
                    ui.add_space(20.0);
                    ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                }
            });

        if let (Some(path), Some(viewer)) = (opened, app.viewer.as_mut()) {
            viewer.open_card(&path);
        }
    }

    /// Grid of clickable cards; returns the path of the clicked one
    fn show_cards(ui: &mut egui::Ui, title: &str, cards: &[Card]) -> Option<Vec<String>> {
        let mut clicked = None;

        ui.heading(title);
        ui.add_space(12.0);
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
            for card in cards {
                let button = egui::Button::new(egui::RichText::new(&card.name).size(16.0))
                    .min_size(egui::vec2(180.0, 72.0));
                if ui.add(button).clicked() {
                    clicked = Some(card.path.clone());
                }
            }
        });

        clicked
    }

    /// Show empty state
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("Nothing selected");
            ui.label("Pick an entry in the sidebar or search with Ctrl+F");
        });
    }
}

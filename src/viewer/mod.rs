//! Viewer: sidebar model, routing, content loading and rendering

pub mod content;
pub mod context;
pub mod fetch;
pub mod markdown;
pub mod open_state;
pub mod router;
pub mod sidebar;

pub use context::ViewerContext;

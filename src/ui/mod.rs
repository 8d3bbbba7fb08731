//! UI components for Starcodex

pub mod preview;
pub mod sidebar;

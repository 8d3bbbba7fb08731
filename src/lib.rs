//! Starcodex - browsable reference wiki for tabletop RPG sources
//!
//! The [`compiler`] turns a directory of markdown documents into a navigation
//! manifest; the [`viewer`] loads that manifest and drives the desktop browser.

pub mod compiler;
pub mod core;
pub mod viewer;

//! Core types shared by the manifest compiler and the viewer

pub mod config;
pub mod error;
pub mod logging;
pub mod names;
pub mod node;
pub mod storage;

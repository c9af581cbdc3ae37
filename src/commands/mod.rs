//! Command implementations
//!
//! - `diagram`: print the Mermaid text for a repository
//! - `list`: print each commit with its file names
//! - `render`: hand the diagram to an external renderer and open the image
//!
//! `renderer` and `launcher` wrap the two external processes `render` drives.

pub mod diagram;
pub mod launcher;
pub mod list;
pub mod render;
pub mod renderer;

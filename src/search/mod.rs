//! Shortest-path search.

mod dijkstra;
mod path;

pub use dijkstra::find_path;
pub use path::{Path, PathCursor};

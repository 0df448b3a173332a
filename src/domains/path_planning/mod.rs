pub mod geometry;
pub mod nearest;
pub mod ports;
pub mod report;
pub mod spanning_tree;
pub mod tree_path;
pub mod types;
pub mod visibility;

pub use geometry::*;
pub use nearest::*;
pub use ports::*;
pub use report::*;
pub use spanning_tree::*;
pub use tree_path::*;
pub use types::*;
pub use visibility::*;

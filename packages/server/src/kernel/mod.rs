//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ImageEditAdapter, ServerDeps};
pub use test_dependencies::{ImageEditCall, MockImageEditor, TestDependencies};
pub use traits::*;

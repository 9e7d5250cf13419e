//! Handlers 模块

pub mod assets;
pub mod catalog;
pub mod directory;
pub mod health;
pub mod metrics;

pub use assets::*;
pub use catalog::*;
pub use directory::*;
pub use health::*;
pub use metrics::*;

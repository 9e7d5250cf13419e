//! Handler 公共辅助

pub mod query;
pub mod response;
pub mod validation;

pub use query::*;
pub use response::*;
pub use validation::*;

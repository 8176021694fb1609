pub mod schedule;
pub mod projection;
pub mod error;
pub mod cache;

pub use schedule::*;
pub use projection::*;
pub use error::*;
pub use cache::*;

pub mod engine;

pub use engine::AccrualEngine;

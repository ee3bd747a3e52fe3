//! Infrastructure layer - backend loading and the async runtime bridge

pub mod backend;
pub mod runtime;

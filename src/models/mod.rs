pub mod common;
pub mod deployment;
pub mod gemini;
pub mod generation;
pub mod spec;

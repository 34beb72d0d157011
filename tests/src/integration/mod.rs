pub mod determinism;
pub mod lifecycle;

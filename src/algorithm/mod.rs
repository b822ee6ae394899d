/// Optional per-phase timing spans
pub mod benchmark;
/// Engine lifecycle and render orchestration
pub mod engine;
/// Pixel-to-seed assignment and sample accumulation
pub mod sampler;
/// Shape registry binding lattice, solver and outline
pub mod shapes;

pub mod sampler;
pub mod scheduler;

pub mod collector;
pub mod control;
pub mod platform;
pub mod process;
pub mod rate;
pub mod sampler;
pub mod snapshot;
pub mod source;

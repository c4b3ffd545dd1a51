pub mod direct;
pub mod likelihood;
pub mod rejection;

pub use direct::direct_sample;
pub use likelihood::likelihood_weighting;
pub use rejection::rejection_sample;

pub mod pipeline;
pub mod shared;
pub mod statistics;
pub mod video;

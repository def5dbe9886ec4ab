pub mod frame_stats;
pub mod histogram;
pub mod signal;
pub mod window_stats;

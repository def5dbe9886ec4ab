pub mod analysis_worker;
pub mod playback_worker;

pub mod analysis_logger;
pub mod analyze_video_use_case;
pub mod magnifier_view;
pub mod video_frame_series;

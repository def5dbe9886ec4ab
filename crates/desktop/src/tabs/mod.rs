pub mod magnifier_tab;
pub mod settings_tab;
pub mod video_tab;

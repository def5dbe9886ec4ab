use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{button, column, container, image, row, text};
use iced::{Element, Length, Point, Subscription, Task, Theme};

use pixelscope_core::pipeline::magnifier_view::{MagnifierState, Probe, RedrawCommand};
use pixelscope_core::pipeline::video_frame_series::VideoFrameSeries;
use pixelscope_core::shared::constants::{DEFAULT_IMAGE_NAME, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use pixelscope_core::shared::frame::Frame;
use pixelscope_core::statistics::frame_stats::FrameStats;
use pixelscope_core::statistics::histogram::Histogram;
use pixelscope_core::video::infrastructure::image_file_reader::load_image;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::workers::analysis_worker::{self, AnalysisMessage};
use crate::workers::playback_worker::{self, PlaybackHandle, PlaybackMessage};

/// Worker channels are drained at this rate while a video is open.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Magnifier,
    Video,
    Settings,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Magnifier, Tab::Video, Tab::Settings];

    fn label(self) -> &'static str {
        match self {
            Tab::Magnifier => "Magnifier",
            Tab::Video => "Video",
            Tab::Settings => "Settings",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    OpenImage,
    ImagePicked(Option<PathBuf>),
    ImageLoaded(Result<(PathBuf, Arc<Frame>), String>),
    CursorMoved(Point),
    CursorLeft,
    OpenVideo,
    VideoPicked(Option<PathBuf>),
    Tick,
    RadiusChanged(u32),
    ZoomChanged(u32),
    IntervalChanged(u32),
    RestoreDefaults,
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    PollSystemTheme,
}

// ---------------------------------------------------------------------------
// Magnifier state
// ---------------------------------------------------------------------------

/// What the magnifier currently draws next to the image.
#[derive(Default)]
pub struct Overlay {
    pub crop: Option<(image::Handle, u32, u32)>,
    pub info: Option<Probe>,
    pub histogram: Option<Histogram>,
}

pub struct LoadedImage {
    pub path: PathBuf,
    pub frame: Arc<Frame>,
    pub handle: image::Handle,
    pub magnifier: MagnifierState,
    pub overlay: Overlay,
}

impl LoadedImage {
    fn new(path: PathBuf, frame: Arc<Frame>, magnifier: &MagnifierState) -> Self {
        let handle = image::Handle::from_rgba(frame.width(), frame.height(), frame.to_rgba());
        let (magnifier, commands) = magnifier.on_image_replaced();
        let mut loaded = Self {
            path,
            frame,
            handle,
            magnifier,
            overlay: Overlay::default(),
        };
        loaded.apply(commands);
        loaded
    }

    fn apply(&mut self, commands: Vec<RedrawCommand>) {
        for command in commands {
            match command {
                RedrawCommand::Crop { window, zoom } => match self.frame.crop(&window) {
                    Ok(crop) => {
                        let (w, h) = (crop.width(), crop.height());
                        let handle = image::Handle::from_rgba(w, h, crop.to_rgba());
                        self.overlay.crop = Some((handle, w * zoom, h * zoom));
                    }
                    Err(e) => log::warn!("Could not crop magnifier window: {e}"),
                },
                RedrawCommand::Info(probe) => self.overlay.info = Some(probe),
                RedrawCommand::Histogram(histogram) => self.overlay.histogram = Some(histogram),
                RedrawCommand::ClearOverlay => self.overlay = Overlay::default(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Video state
// ---------------------------------------------------------------------------

/// Plot-ready vectors derived once from a finished analysis.
pub struct ChartData {
    pub means: [Vec<f64>; 3],
    pub contrast: Vec<f64>,
    pub normalized: Option<[Vec<f64>; 3]>,
    pub distances: Option<[f64; 3]>,
    pub series: Box<VideoFrameSeries>,
}

impl ChartData {
    fn from_series(series: Box<VideoFrameSeries>) -> Self {
        let means = [0, 1, 2].map(|c| series.mean().row(c).to_vec());
        let contrast = series.contrast().to_vec();
        let normalized = match series.normalized_std_dev() {
            Ok(n) => Some([0, 1, 2].map(|c| n.row(c).to_vec())),
            Err(e) => {
                log::warn!("Normalized series unavailable: {e}");
                None
            }
        };
        let distances = series.channel_distances().ok();
        Self {
            means,
            contrast,
            normalized,
            distances,
            series,
        }
    }
}

pub enum AnalysisState {
    Running { done: usize, total: usize },
    Complete(ChartData),
    Failed(String),
}

pub struct VideoSession {
    pub path: PathBuf,
    pub analysis: AnalysisState,
    analysis_rx: Option<Receiver<AnalysisMessage>>,
    playback: Option<PlaybackHandle>,
    pub current: Option<(image::Handle, usize, FrameStats)>,
    pub playback_error: Option<String>,
}

impl VideoSession {
    fn start(path: PathBuf, interval: Duration) -> Self {
        log::info!("Opening video {}", path.display());
        Self {
            analysis_rx: Some(analysis_worker::spawn(path.clone())),
            playback: Some(playback_worker::spawn(path.clone(), interval)),
            path,
            analysis: AnalysisState::Running { done: 0, total: 0 },
            current: None,
            playback_error: None,
        }
    }

    fn restart_playback(&mut self, interval: Duration) {
        // Drop the old handle first so its thread stops before a new one opens the file.
        self.playback = None;
        self.playback_error = None;
        self.playback = Some(playback_worker::spawn(self.path.clone(), interval));
    }

    fn is_active(&self) -> bool {
        self.analysis_rx.is_some() || self.playback.is_some()
    }

    fn poll(&mut self) {
        if let Some(rx) = &self.analysis_rx {
            loop {
                match rx.try_recv() {
                    Ok(AnalysisMessage::Progress(done, total)) => {
                        self.analysis = AnalysisState::Running { done, total };
                    }
                    Ok(AnalysisMessage::Complete(series)) => {
                        self.analysis = AnalysisState::Complete(ChartData::from_series(series));
                    }
                    Ok(AnalysisMessage::Error(e)) => {
                        self.analysis = AnalysisState::Failed(e);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.analysis_rx = None;
                        break;
                    }
                }
            }
        }

        if let Some(playback) = &self.playback {
            loop {
                match playback.rx.try_recv() {
                    Ok(PlaybackMessage::Frame {
                        handle,
                        index,
                        stats,
                    }) => self.current = Some((handle, index, stats)),
                    Ok(PlaybackMessage::Error(e)) => self.playback_error = Some(e),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.playback = None;
                        break;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    magnifier: MagnifierState,
    image: Option<LoadedImage>,
    image_error: Option<String>,
    video: Option<VideoSession>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let magnifier = MagnifierState::new(settings.magnifier_config());
        (
            Self {
                active_tab: Tab::Magnifier,
                settings,
                magnifier,
                image: None,
                image_error: None,
                video: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::OpenImage => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Open image")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ImagePicked,
                );
            }
            Message::ImagePicked(picked) => {
                // A cancelled dialog falls back to the default image when one is present.
                let path = match picked {
                    Some(path) => path,
                    None => {
                        let fallback = PathBuf::from(DEFAULT_IMAGE_NAME);
                        if !fallback.is_file() {
                            return Task::none();
                        }
                        fallback
                    }
                };
                return Task::perform(
                    async move {
                        load_image(&path)
                            .map(|frame| (path, Arc::new(frame)))
                            .map_err(|e| e.to_string())
                    },
                    Message::ImageLoaded,
                );
            }
            Message::ImageLoaded(Ok((path, frame))) => {
                log::info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    frame.width(),
                    frame.height()
                );
                let loaded = LoadedImage::new(path, frame, &self.magnifier);
                self.magnifier = loaded.magnifier.clone();
                self.image = Some(loaded);
                self.image_error = None;
            }
            Message::ImageLoaded(Err(e)) => {
                log::warn!("Could not open image: {e}");
                self.image_error = Some(e);
            }
            Message::CursorMoved(position) => {
                if let Some(img) = &mut self.image {
                    let x = position.x.floor() as i64;
                    let y = position.y.floor() as i64;
                    match img.magnifier.on_cursor_moved(&img.frame, x, y) {
                        Ok((next, commands)) => {
                            img.magnifier = next;
                            img.apply(commands);
                        }
                        Err(e) => self.image_error = Some(e.to_string()),
                    }
                }
            }
            Message::CursorLeft => {
                if let Some(img) = &mut self.image {
                    if let Ok((next, commands)) = img.magnifier.on_cursor_moved(&img.frame, -1, -1)
                    {
                        img.magnifier = next;
                        img.apply(commands);
                    }
                }
            }
            Message::OpenVideo => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Open video")
                            .add_filter("Videos", VIDEO_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::VideoPicked,
                );
            }
            Message::VideoPicked(Some(path)) => {
                // Dropping the previous session stops its workers.
                self.video = None;
                self.video = Some(VideoSession::start(path, self.playback_interval()));
            }
            Message::VideoPicked(None) => {}
            Message::Tick => {
                if let Some(video) = &mut self.video {
                    video.poll();
                }
            }
            Message::RadiusChanged(radius) => {
                self.settings.window_radius = radius;
                self.settings.save();
                self.apply_magnifier_config();
            }
            Message::ZoomChanged(zoom) => {
                self.settings.zoom = zoom;
                self.settings.save();
                self.apply_magnifier_config();
            }
            Message::IntervalChanged(ms) => {
                self.settings.playback_interval_ms = ms;
                self.settings.save();
                let interval = self.playback_interval();
                if let Some(video) = &mut self.video {
                    video.restart_playback(interval);
                }
            }
            Message::RestoreDefaults => {
                let defaults = Settings::default();
                self.settings.window_radius = defaults.window_radius;
                self.settings.zoom = defaults.zoom;
                self.settings.playback_interval_ms = defaults.playback_interval_ms;
                self.settings.save();
                self.apply_magnifier_config();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::PollSystemTheme => {
                // Theme is resolved fresh in theme() on every render,
                // so just requesting a redraw is enough.
            }
        }
        Task::none()
    }

    fn playback_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.settings.playback_interval_ms))
    }

    fn apply_magnifier_config(&mut self) {
        let config = self.settings.magnifier_config();
        match &mut self.image {
            Some(img) => match img.magnifier.on_config_changed(&img.frame, config) {
                Ok((next, commands)) => {
                    img.magnifier = next;
                    img.apply(commands);
                    self.magnifier = img.magnifier.clone();
                }
                Err(e) => self.image_error = Some(e.to_string()),
            },
            None => self.magnifier = MagnifierState::new(config),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let theme = self.theme();

        // Tab bar
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(13.0, fs));
                let btn = button(label)
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        // Tab content
        let content: Element<'_, Message> = match self.active_tab {
            Tab::Magnifier => tabs::magnifier_tab::view(
                fs,
                self.image.as_ref(),
                self.image_error.as_deref(),
                &theme,
            ),
            Tab::Video => tabs::video_tab::view(fs, self.video.as_ref(), &theme),
            Tab::Settings => tabs::settings_tab::view(&self.settings),
        };

        let tab_content = container(content).padding(16).height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let theme_poll = if self.settings.appearance == Appearance::System {
            iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme)
        } else {
            Subscription::none()
        };
        let worker_poll = if self.video.as_ref().is_some_and(VideoSession::is_active) {
            iced::time::every(POLL_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };
        Subscription::batch([theme_poll, worker_poll])
    }
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelscope_core::pipeline::magnifier_view::MagnifierConfig;

    fn gradient(width: u32, height: u32) -> Arc<Frame> {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 0]);
            }
        }
        Arc::new(Frame::new(data, width, height, 3, 0))
    }

    #[test]
    fn test_scaled_rounds() {
        assert_eq!(scaled(13.0, 1.0), 13.0);
        assert_eq!(scaled(13.0, 1.25), 16.0);
    }

    #[test]
    fn test_loaded_image_starts_without_overlay() {
        let state = MagnifierState::new(MagnifierConfig { radius: 1, zoom: 4 });
        let img = LoadedImage::new(PathBuf::from("x.png"), gradient(8, 6), &state);
        assert!(img.overlay.crop.is_none());
        assert!(img.overlay.info.is_none());
        assert!(img.magnifier.probe().is_none());
    }

    #[test]
    fn test_cursor_commands_fill_and_clear_overlay() {
        let state = MagnifierState::new(MagnifierConfig { radius: 1, zoom: 4 });
        let mut img = LoadedImage::new(PathBuf::from("x.png"), gradient(8, 6), &state);

        let (next, commands) = img.magnifier.on_cursor_moved(&img.frame, 3, 2).unwrap();
        img.magnifier = next;
        img.apply(commands);

        let (_, w, h) = img.overlay.crop.as_ref().unwrap();
        assert_eq!((*w, *h), (12, 12));
        assert_eq!(img.overlay.info.as_ref().unwrap().pixel, [30, 20, 0]);
        assert!(img.overlay.histogram.is_some());

        let (next, commands) = img.magnifier.on_cursor_moved(&img.frame, -1, 0).unwrap();
        img.magnifier = next;
        img.apply(commands);
        assert!(img.overlay.crop.is_none());
        assert!(img.overlay.histogram.is_none());
    }
}

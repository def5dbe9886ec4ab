use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

/// Resolve the iced Theme from appearance + high_contrast settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };

    let palette = match (is_dark, high_contrast) {
        (true, false) => dark_palette(),
        (false, false) => light_palette(),
        (true, true) => high_contrast_dark_palette(),
        (false, true) => high_contrast_light_palette(),
    };

    Theme::custom("PixelScope", palette)
}

/// Plot color for channel 0, 1, 2 (R, G, B).
pub fn channel_color(channel: usize) -> Color {
    match channel {
        0 => color!(0xe5, 0x48, 0x4d),
        1 => color!(0x30, 0xa4, 0x6c),
        _ => color!(0x3e, 0x63, 0xdd),
    }
}

/// Plot color for the greyscale contrast series.
pub fn contrast_color(theme: &Theme) -> Color {
    theme.palette().text
}

/// Secondary text, e.g. panel labels.
pub fn muted_color(theme: &Theme) -> Color {
    Color {
        a: 0.6,
        ..theme.palette().text
    }
}

/// Slightly raised background for panels and chart areas.
pub fn surface_color(theme: &Theme) -> Color {
    let p = theme.palette();
    let lift = if p.background.r < 0.5 { 0.06 } else { -0.04 };
    Color {
        r: (p.background.r + lift).clamp(0.0, 1.0),
        g: (p.background.g + lift).clamp(0.0, 1.0),
        b: (p.background.b + lift).clamp(0.0, 1.0),
        a: 1.0,
    }
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x18, 0x19, 0x1b),
        text: color!(0xd4, 0xd4, 0xd8),
        primary: color!(0x4f, 0x9c, 0xf9),
        success: color!(0x30, 0xd1, 0x58),
        warning: color!(0xff, 0xcc, 0x00),
        danger: color!(0xff, 0x45, 0x3a),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf4, 0xf4, 0xf5),
        text: color!(0x1c, 0x1c, 0x1f),
        primary: color!(0x25, 0x63, 0xeb),
        success: color!(0x34, 0xc7, 0x59),
        warning: color!(0xff, 0x9f, 0x0a),
        danger: color!(0xdc, 0x26, 0x26),
    }
}

fn high_contrast_dark_palette() -> Palette {
    Palette {
        background: color!(0x00, 0x00, 0x00),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0x6c, 0xb4, 0xff),
        success: color!(0x30, 0xd1, 0x58),
        warning: color!(0xff, 0xd6, 0x0a),
        danger: color!(0xff, 0x45, 0x3a),
    }
}

fn high_contrast_light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x00, 0x00, 0x00),
        primary: color!(0x00, 0x50, 0xd0),
        success: color!(0x24, 0x8a, 0x3d),
        warning: color!(0xb2, 0x5c, 0x00),
        danger: color!(0xd7, 0x00, 0x15),
    }
}

fn detect_system_dark_mode() -> bool {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(true)
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}

use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

/// Resolve the iced Theme from the appearance settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };
    Theme::custom("FaceScan", palette(is_dark, high_contrast))
}

fn palette(is_dark: bool, high_contrast: bool) -> Palette {
    match (is_dark, high_contrast) {
        (true, false) => Palette {
            background: color!(0x17, 0x1a, 0x21),
            text: color!(0xd8, 0xdb, 0xe2),
            primary: color!(0xff, 0x6b, 0x4a),
            success: color!(0x3f, 0xc7, 0x7a),
            warning: color!(0xf5, 0xc2, 0x18),
            danger: color!(0xff, 0x4d, 0x5e),
        },
        (false, false) => Palette {
            background: color!(0xfa, 0xfa, 0xfc),
            text: color!(0x26, 0x27, 0x30),
            primary: color!(0xff, 0x4b, 0x4b),
            success: color!(0x21, 0xa3, 0x5a),
            warning: color!(0xc9, 0x8a, 0x00),
            danger: color!(0xd9, 0x2d, 0x3a),
        },
        (true, true) => Palette {
            background: color!(0x00, 0x00, 0x00),
            text: color!(0xff, 0xff, 0xff),
            primary: color!(0xff, 0x85, 0x6b),
            success: color!(0x4c, 0xe0, 0x8a),
            warning: color!(0xff, 0xde, 0x3b),
            danger: color!(0xff, 0x5c, 0x6c),
        },
        (false, true) => Palette {
            background: color!(0xff, 0xff, 0xff),
            text: color!(0x00, 0x00, 0x00),
            primary: color!(0xc4, 0x1a, 0x1a),
            success: color!(0x0b, 0x6e, 0x34),
            warning: color!(0x8a, 0x5a, 0x00),
            danger: color!(0xb0, 0x00, 0x14),
        },
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

/// Help lines and captions.
pub fn tertiary_color(theme: &Theme) -> Color {
    let text = theme.extended_palette().background.base.text;
    Color { a: 0.6, ..text }
}

pub fn success_color(theme: &Theme) -> Color {
    theme.extended_palette().success.base.color
}

pub fn warning_color(theme: &Theme) -> Color {
    theme.extended_palette().warning.base.color
}

pub fn danger_color(theme: &Theme) -> Color {
    theme.extended_palette().danger.base.color
}

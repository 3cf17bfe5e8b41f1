use ratatui::style::Color;

use crate::config::ColorsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorSupport::Mono;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone)]
pub struct HeatOverrides {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl HeatOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            low: colors.heat_low.clone(),
            mid: colors.heat_mid.clone(),
            high: colors.heat_high.clone(),
        }
    }
}

/// Usage above this percentage renders with the mid heat color.
pub const HEAT_MID_PERCENT: f32 = 50.0;
/// Usage above this percentage renders with the high heat color.
pub const HEAT_HIGH_PERCENT: f32 = 80.0;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_unfilled: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub heat_colors: [Color; 3],
}

impl Theme {
    pub fn from_config(theme_name: &str, heat: &HeatOverrides, support: ColorSupport) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "vivid" => Self::vivid(),
            "mono" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        } else if theme.name != "mono" {
            theme.apply_heat_overrides(heat);
        }

        theme.apply_color_support(support);
        theme
    }

    pub fn next(&self, heat: &HeatOverrides, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let next_name = match self.name {
            "dark" => "vivid",
            "vivid" => "light",
            _ => "dark",
        };
        Theme::from_config(next_name, heat, support)
    }

    /// Color for a 0-100 usage figure.
    pub fn usage_color(&self, percent: f32) -> Color {
        if percent > HEAT_HIGH_PERCENT {
            self.heat_colors[2]
        } else if percent > HEAT_MID_PERCENT {
            self.heat_colors[1]
        } else {
            self.heat_colors[0]
        }
    }

    fn apply_heat_overrides(&mut self, heat: &HeatOverrides) {
        let low = parse_hex_color(&heat.low);
        let mid = parse_hex_color(&heat.mid);
        let high = parse_hex_color(&heat.high);

        // All three anchors or none, so a typo can't produce a lopsided scale.
        if let (Some(low), Some(mid), Some(high)) = (low, mid, high) {
            self.heat_colors = [low, mid, high];
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.status_ok = map(self.status_ok);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.overlay_border = map(self.overlay_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.accent = map(self.accent);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.selection_bg = map(self.selection_bg);
        self.selection_fg = map(self.selection_fg);

        self.heat_colors = self.heat_colors.map(map);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Green,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::DarkGray,
            selection_bg: Color::Rgb(55, 65, 81),
            selection_fg: Color::White,
            heat_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            accent: Color::Blue,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            selection_bg: Color::Rgb(180, 200, 230),
            selection_fg: Color::Black,
            heat_colors: [
                Color::Rgb(100, 180, 100),
                Color::Rgb(220, 180, 50),
                Color::Rgb(200, 60, 60),
            ],
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            header_accent_bg: Color::Rgb(203, 166, 247),
            header_accent_fg: Color::Rgb(30, 30, 46),
            status_ok: Color::Rgb(166, 227, 161),
            status_err: Color::Rgb(243, 139, 168),
            statusbar_bg: Color::Rgb(49, 50, 68),
            overlay_border: Color::Rgb(69, 71, 90),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            accent: Color::Rgb(203, 166, 247),
            pill_key_bg: Color::Rgb(203, 166, 247),
            pill_key_fg: Color::Rgb(30, 30, 46),
            pill_desc_fg: Color::Rgb(205, 214, 244),
            surface_bg: Color::Rgb(49, 50, 68),
            gauge_unfilled: Color::Rgb(69, 71, 90),
            selection_bg: Color::Rgb(69, 71, 90),
            selection_fg: Color::Rgb(205, 214, 244),
            heat_colors: [
                Color::Rgb(125, 211, 252),
                Color::Rgb(251, 146, 60),
                Color::Rgb(236, 72, 153),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_unfilled: Color::Black,
            selection_bg: Color::White,
            selection_fg: Color::Black,
            heat_colors: [Color::Gray, Color::White, Color::White],
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> HeatOverrides {
        HeatOverrides {
            low: String::new(),
            mid: String::new(),
            high: String::new(),
        }
    }

    #[test]
    fn usage_color_threshold_boundaries() {
        let theme = Theme::dark();
        assert_eq!(theme.usage_color(0.0), theme.heat_colors[0]);
        assert_eq!(theme.usage_color(50.0), theme.heat_colors[0]);
        assert_eq!(theme.usage_color(50.1), theme.heat_colors[1]);
        assert_eq!(theme.usage_color(80.0), theme.heat_colors[1]);
        assert_eq!(theme.usage_color(80.1), theme.heat_colors[2]);
    }

    #[test]
    fn heat_overrides_need_all_three_anchors() {
        let partial = HeatOverrides {
            low: "#000000".to_string(),
            mid: "nope".to_string(),
            high: "#ffffff".to_string(),
        };
        let theme = Theme::from_config("dark", &partial, ColorSupport::Truecolor);
        assert_eq!(theme.heat_colors, Theme::dark().heat_colors);

        let full = HeatOverrides {
            low: "#010203".to_string(),
            mid: "#040506".to_string(),
            high: "#070809".to_string(),
        };
        let theme = Theme::from_config("dark", &full, ColorSupport::Truecolor);
        assert_eq!(theme.heat_colors[0], Color::Rgb(1, 2, 3));
        assert_eq!(theme.heat_colors[2], Color::Rgb(7, 8, 9));
    }

    #[test]
    fn theme_cycles_through_palettes() {
        let heat = no_overrides();
        let theme = Theme::from_config("dark", &heat, ColorSupport::Truecolor);
        let theme = theme.next(&heat, ColorSupport::Truecolor);
        assert_eq!(theme.name, "vivid");
        let theme = theme.next(&heat, ColorSupport::Truecolor);
        assert_eq!(theme.name, "light");
        let theme = theme.next(&heat, ColorSupport::Truecolor);
        assert_eq!(theme.name, "dark");
    }

    #[test]
    fn mono_support_forces_mono_theme() {
        let heat = no_overrides();
        let theme = Theme::from_config("vivid", &heat, ColorSupport::Mono);
        assert_eq!(theme.name, "mono");
        assert_eq!(theme.next(&heat, ColorSupport::Mono).name, "mono");
    }

    #[test]
    fn color256_maps_rgb_to_indexed() {
        let theme = Theme::from_config("vivid", &no_overrides(), ColorSupport::Color256);
        assert!(matches!(theme.accent, Color::Indexed(_)));
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn color_support_parsing() {
        assert_eq!(ColorSupport::from_config_str("TrueColor"), ColorSupport::Truecolor);
        assert_eq!(ColorSupport::from_config_str("256"), ColorSupport::Color256);
        assert_eq!(ColorSupport::from_config_str("mono"), ColorSupport::Mono);
        assert_eq!(ColorSupport::from_config_str("whatever"), ColorSupport::Auto);
    }
}

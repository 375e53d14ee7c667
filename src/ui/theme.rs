use ratatui::style::Color;

/// 플레이그라운드 색상
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_dim: Color,
    pub border: Color,
    pub header_fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub command_key_fg: Color,
    pub accent: Color,
    pub warning: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            bg_primary: Color::Rgb(30, 30, 30),
            fg_primary: Color::Rgb(212, 212, 212),
            fg_dim: Color::Rgb(128, 128, 128),
            border: Color::Rgb(60, 60, 60),
            header_fg: Color::Rgb(86, 156, 214),
            highlight_bg: Color::Rgb(0, 120, 212),
            highlight_fg: Color::Rgb(255, 255, 255),
            status_bar_bg: Color::Rgb(0, 122, 204),
            status_bar_fg: Color::Rgb(255, 255, 255),
            command_key_fg: Color::Rgb(0, 120, 212),
            accent: Color::Rgb(78, 201, 176),
            warning: Color::Rgb(255, 165, 0),
            disabled: Color::Rgb(100, 100, 100),
        }
    }
}

use ratatui::style::Color;

/// Gruvbox dark palette used by every view
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds, darkest first
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub bg3: Color,
    pub bg4: Color,

    // Foregrounds
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accents
    pub accent: Color,
    pub accent_dim: Color,
    pub info: Color,

    // Status
    pub success: Color,
    pub danger: Color,
}

impl Theme {
    pub fn gruvbox() -> Self {
        Self {
            bg0: Color::Rgb(0x1d, 0x20, 0x21),
            bg1: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x32, 0x30, 0x2f),
            bg3: Color::Rgb(0x3c, 0x38, 0x36),
            bg4: Color::Rgb(0x50, 0x49, 0x45),

            fg_primary: Color::Rgb(0xeb, 0xdb, 0xb2),
            fg_secondary: Color::Rgb(0xa8, 0x99, 0x84),
            fg_muted: Color::Rgb(0x92, 0x83, 0x74),

            accent: Color::Rgb(0xfa, 0xbd, 0x2f),
            accent_dim: Color::Rgb(0xd7, 0x99, 0x21),
            info: Color::Rgb(0x83, 0xa5, 0x98),

            success: Color::Rgb(0xb8, 0xbb, 0x26),
            danger: Color::Rgb(0xfb, 0x49, 0x34),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_is_gruvbox_yellow() {
        let theme = Theme::gruvbox();
        assert_eq!(theme.accent, Color::Rgb(250, 189, 47));
        assert_eq!(theme.bg0, Color::Rgb(29, 32, 33));
    }
}

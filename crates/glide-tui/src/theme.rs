use ratatui::style::Color;

/// Runtime colour set
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub accent: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            highlight: Color::Rgb(0xd8, 0xa6, 0x57),
        }
    }
}

impl Theme {
    /// Blend `color` towards the background; `opacity` 1.0 keeps it unchanged
    pub fn fade(&self, color: Color, opacity: f32) -> Color {
        match (color, self.bg0) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
                let t = opacity.clamp(0.0, 1.0);
                let mix = |c: u8, base: u8| -> u8 {
                    (f32::from(base) + (f32::from(c) - f32::from(base)) * t).round() as u8
                };
                Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
            }
            // Named colors cannot be blended
            _ if opacity < 1.0 => self.grey0,
            _ => color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_extremes() {
        let theme = Theme::default();
        assert_eq!(theme.fade(theme.fg0, 1.0), theme.fg0);
        assert_eq!(theme.fade(theme.fg0, 0.0), theme.bg0);
    }

    #[test]
    fn test_fade_partial_lies_between() {
        let theme = Theme::default();
        let Color::Rgb(r, _, _) = theme.fade(Color::Rgb(0xff, 0xff, 0xff), 0.3) else {
            panic!("expected rgb");
        };
        assert!(r > 0x28 && r < 0xff);
    }

    #[test]
    fn test_named_color_dims_to_grey() {
        let theme = Theme::default();
        assert_eq!(theme.fade(Color::White, 0.3), theme.grey0);
        assert_eq!(theme.fade(Color::White, 1.0), Color::White);
    }
}

string_enum! {
    /// Text and block color, including the `*_background` variants.
    #[derive(Default)]
    pub enum Color {
        #[default]
        Default => "default",
        Gray => "gray",
        Brown => "brown",
        Orange => "orange",
        Yellow => "yellow",
        Green => "green",
        Blue => "blue",
        Purple => "purple",
        Pink => "pink",
        Red => "red",
        GrayBackground => "gray_background",
        BrownBackground => "brown_background",
        OrangeBackground => "orange_background",
        YellowBackground => "yellow_background",
        GreenBackground => "green_background",
        BlueBackground => "blue_background",
        PurpleBackground => "purple_background",
        PinkBackground => "pink_background",
        RedBackground => "red_background",
    }
}

impl Color {
    /// Check if this is a background color
    pub fn is_background(&self) -> bool {
        self.as_str().ends_with("_background")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_str("red").unwrap(), Color::Red);
        assert_eq!(
            Color::from_str("gray_background").unwrap(),
            Color::GrayBackground
        );
        assert!(Color::from_str("light_gray").is_err());
        assert!(Color::from_str("invalid").is_err());
    }

    #[test]
    fn test_background_colors() {
        assert!(!Color::Red.is_background());
        assert!(Color::RedBackground.is_background());
    }

    #[test]
    fn test_default_color_is_default() {
        assert_eq!(Color::default().to_string(), "default");
    }
}

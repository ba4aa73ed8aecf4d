pub const THEME_KEY: &str = "darkMode";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_title(self) -> &'static str {
        match self {
            Self::Light => "Dark mode",
            Self::Dark => "Light mode",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    /// Colour painted by the expanding mask when transitioning into this theme.
    pub fn mask_color(self) -> &'static str {
        match self {
            Self::Light => "#ffffff",
            Self::Dark => "#000000",
        }
    }

    pub fn base_color(self) -> &'static str {
        match self {
            Self::Light => "#fafaf8",
            Self::Dark => "#1a1a1a",
        }
    }
}

pub trait PreferenceStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), &'static str>;
}

pub fn decode_preference(raw: Option<&str>) -> bool {
    raw.and_then(|value| serde_json::from_str::<bool>(value.trim()).ok())
        .unwrap_or(false)
}

pub fn encode_preference(is_dark: bool) -> String {
    serde_json::Value::Bool(is_dark).to_string()
}

pub fn load_preference(storage: Option<&dyn PreferenceStorage>) -> bool {
    let raw = storage.and_then(|storage| storage.read(THEME_KEY));
    decode_preference(raw.as_deref())
}

pub fn save_preference(storage: Option<&mut dyn PreferenceStorage>, is_dark: bool) -> bool {
    match storage {
        Some(storage) => storage.write(THEME_KEY, &encode_preference(is_dark)).is_ok(),
        None => false,
    }
}

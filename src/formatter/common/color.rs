use std::io;

/// Whether a formatter colors its output.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    /// Color if the target is a terminal.
    #[default]
    Automatic,
    Always,
    Never,
}

impl ColorSetting {
    pub fn use_color(self, target: &impl SupportsColor) -> bool {
        match self {
            ColorSetting::Automatic => target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}

impl From<bool> for ColorSetting {
    fn from(color: bool) -> Self {
        match color {
            true => ColorSetting::Always,
            false => ColorSetting::Never,
        }
    }
}

pub(crate) mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
}

pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}

use std::io::IsTerminal;

use apiview_fmt::Colorizer;

/// When to paint text output with ANSI colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Color {
    /// Paint only when stdout is a terminal.
    #[default]
    Auto,
    Never,
    Always,
}

impl Color {
    /// The colorizer for text written to stdout, or to a file when `to_file` is set.
    ///
    /// Files only get colors when asked for explicitly.
    pub fn colorizer(self, to_file: bool) -> Colorizer {
        let enabled = match self {
            Self::Auto => !to_file && std::io::stdout().is_terminal(),
            Self::Never => false,
            Self::Always => true,
        };
        Colorizer::new(enabled)
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            _ => Err(format!("invalid color choice '{s}', expected auto, never or always")),
        }
    }
}

use owo_colors::OwoColorize;

/// Completion glyphs written in front of finished operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glyphs {
    colors: bool,
}

impl Glyphs {
    pub const SUCCESS: &'static str = "✓";
    pub const FAILURE: &'static str = "✗";

    /// Glyphs painted green (success) and red (failure).
    pub fn colored() -> Self {
        Self { colors: true }
    }

    pub fn plain() -> Self {
        Self { colors: false }
    }

    pub fn success(&self) -> String {
        match self.colors {
            true => Self::SUCCESS.green().to_string(),
            false => Self::SUCCESS.to_owned(),
        }
    }

    pub fn failure(&self) -> String {
        match self.colors {
            true => Self::FAILURE.red().to_string(),
            false => Self::FAILURE.to_owned(),
        }
    }
}

use std::fmt;

/// Cycles through the glyphs drawn in front of the innermost operation.
///
/// The render driver calls [`Spinner::tick`] once per frame and draws
/// [`Spinner::frame`] in front of the top operation's label.
///
/// ```rust
/// use nested_progress::util::Spinner;
///
/// let mut spinner = Spinner::line();
/// assert_eq!(spinner.frame(), "|");
/// spinner.tick();
/// assert_eq!(spinner.to_string(), "/");
/// ```
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    index: usize,
}

impl Spinner {
    /// Braille dot spinner (the default).
    pub fn dots() -> Self {
        Self::custom(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }

    /// ASCII-only frames for terminals without braille glyphs.
    pub fn line() -> Self {
        Self::custom(&["|", "/", "-", "\\"])
    }

    /// An empty slice falls back to [`Spinner::dots`].
    pub fn custom(frames: &'static [&'static str]) -> Self {
        if frames.is_empty() {
            return Self::dots();
        }
        Self { frames, index: 0 }
    }

    /// Moves to the next glyph, wrapping at the end.
    pub fn tick(&mut self) {
        self.index = (self.index + 1) % self.frames.len();
    }

    /// The glyph to draw this frame.
    pub fn frame(&self) -> &'static str {
        self.frames[self.index]
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::dots()
    }
}

impl fmt::Display for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame())
    }
}

/// Leading whitespace for a line drawn at a given nesting depth.
///
/// ```text
/// ⠋ Setting up environment
/// ⠙   Downloading dependencies
///   ✓ Dependencies downloaded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(pub usize);

impl Indent {
    /// Columns per nesting level.
    pub const WIDTH: usize = 2;
}

impl std::fmt::Display for Indent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:width$}", "", width = self.0 * Self::WIDTH)
    }
}

//! Rendering helpers for progress lines.
//!
//! # Spinner
//!
//! [`Spinner`] cycles through animation frames on each [`tick`](Spinner::tick):
//!
//! ```rust
//! use nested_progress::util::Spinner;
//!
//! let mut spinner = Spinner::dots(); // ⠋ ⠙ ⠹ ...
//! spinner.tick();
//! assert_eq!(spinner.frame(), "⠙");
//! ```
//!
//! # Indent
//!
//! [`Indent`] turns a nesting depth into leading whitespace.
//!
//! # Glyphs
//!
//! [`Glyphs`] renders the success and failure markers, optionally colored.

mod glyphs;
mod indent;
mod spinner;

pub use glyphs::*;
pub use indent::*;
pub use spinner::*;

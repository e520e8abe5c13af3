//! Terminal-window markup for static-site block tags.
//!
//! The renderer is a pure transformation from a block's already-rendered body
//! and the tag's prompt token to an HTML fragment. It holds no state between
//! calls; identical inputs always yield byte-identical output.
//!
//! Exposed Components:
//! - `terminal`: `TerminalRenderer` + `RenderOptions` (header, escaping) and the
//!   `render` convenience function using defaults.
//! - `lines`: prompt repetition count and prompt column assembly.
//! - `escape`: HTML escaping for hosts that opt out of verbatim interpolation.
//!
//! Line Count Rule: repetitions are `lines - 1` with a trailing newline not
//! opening a new line. A block written as `cmd\noutput\n` gets one prompt; a
//! single line gets none. Empty content counts `-1` and renders an empty
//! column. Hosts that want one prompt per visible line must adapt the content,
//! not this rule.

pub mod escape;
pub mod lines;
pub mod terminal;

pub use terminal::{RenderOptions, RenderRequest, TerminalRenderer, render};

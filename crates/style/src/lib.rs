//! Inline style surface for the page elements the engine animates.
//!
//! The engine never reads a global document. It talks to a [`StyleSurface`],
//! which the in-memory [`StyleTree`] implements: elements with inline
//! declarations, custom properties, the `animation` shorthand, and enough of
//! a keyframe evaluator ([`marquee`]) to report where an animated span
//! currently is.

mod animation;
pub mod marquee;
mod surface;
mod tree;
mod values;

pub use animation::{AnimationList, AnimationSpec, FillMode, Iterations, Timing, parse_animation_list};
pub use surface::{ComputedPosition, StyleSurface};
pub use tree::StyleTree;
pub use values::{Length, format_matrix_x, parse_length, parse_translate_x};

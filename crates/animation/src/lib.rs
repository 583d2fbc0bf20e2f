//! Marquee hover animation for buttons.
//!
//! [`HoverAnimationCoordinator`] drives a two-phase animation on the first
//! `<span>` of a hovered element: slide to the edge and loop while hovered,
//! glide back to center from wherever the loop currently is on leave.
//!
//! The coordinator does no enablement checks; callers skip disabled
//! elements before calling in.

mod coordinator;

pub use coordinator::{AnimationState, HoverAnimationCoordinator};

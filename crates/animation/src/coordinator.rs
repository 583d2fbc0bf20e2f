use core_types::ElementId;
use std::collections::HashMap;
use std::time::Instant;
use style::marquee::{
    CURRENT_LEFT_VAR, CURRENT_TRANSFORM_VAR, EDGE_RUN, RETURN_RUN, enter_animation,
    return_animation,
};
use style::{ComputedPosition, StyleSurface};

/// Where an animated span is in the hover lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    AtRest,
    MovingToEdge,
    Looping,
    ReturningToCenter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Enter,
    Return,
    Stopped,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    phase: Phase,
    since: Instant,
}

/// Applies the marquee animation on hover-enter/leave.
///
/// State is tracked per animated span (not per hovered element), so every
/// button owns its own lifecycle.
#[derive(Debug, Default)]
pub struct HoverAnimationCoordinator {
    transitions: HashMap<ElementId, Transition>,
}

impl HoverAnimationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the slide-to-edge-then-loop animation on `element`'s first span.
    ///
    /// Returns the animated span, or `None` (and does nothing) when the
    /// element or its span is missing.
    pub fn begin_hover<S: StyleSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element: ElementId,
        now: Instant,
    ) -> Option<ElementId> {
        let Some(text) = surface.first_text_child(element) else {
            log::trace!("begin_hover: no text span under {element:?}");
            return None;
        };
        surface.set_animation(text, &enter_animation().to_string(), now);
        self.record(text, Phase::Enter, now);
        Some(text)
    }

    /// Glide `element`'s span back to center, starting from `position`.
    ///
    /// `position` is the span's computed `left`/`transform` at the moment the
    /// pointer left; it seeds `--current-left` / `--current-transform`, which
    /// the return keyframes start from.
    pub fn end_hover<S: StyleSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element: ElementId,
        position: &ComputedPosition,
        now: Instant,
    ) -> Option<ElementId> {
        let Some(text) = surface.first_text_child(element) else {
            log::trace!("end_hover: no text span under {element:?}");
            return None;
        };
        self.apply_return(surface, text, position, now);
        Some(text)
    }

    /// [`end_hover`](Self::end_hover) with the position read from the surface.
    pub fn end_hover_from_computed<S: StyleSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element: ElementId,
        now: Instant,
    ) -> Option<ElementId> {
        let Some(text) = surface.first_text_child(element) else {
            log::trace!("end_hover: no text span under {element:?}");
            return None;
        };
        let Some(position) = surface.computed_position(text, now) else {
            log::trace!("end_hover: no computed position for {text:?}");
            return None;
        };
        self.apply_return(surface, text, &position, now);
        Some(text)
    }

    /// Halt whatever runs on `element`'s span (`animation: none`).
    ///
    /// Follow up with [`rearm`](Self::rearm) on a later tick so the next
    /// hover is treated as a fresh animation.
    pub fn stop<S: StyleSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element: ElementId,
        now: Instant,
    ) -> Option<ElementId> {
        let text = surface.first_text_child(element)?;
        surface.set_animation(text, "none", now);
        self.record(text, Phase::Stopped, now);
        Some(text)
    }

    /// Clear the span's animation property to an empty value.
    pub fn rearm<S: StyleSurface + ?Sized>(&mut self, surface: &mut S, text: ElementId, now: Instant) {
        surface.set_animation(text, "", now);
        self.record(text, Phase::Stopped, now);
    }

    /// Lifecycle state of an animated span.
    pub fn state(&self, text: ElementId, now: Instant) -> AnimationState {
        let Some(t) = self.transitions.get(&text) else {
            return AnimationState::AtRest;
        };
        let elapsed = now.saturating_duration_since(t.since);
        match t.phase {
            Phase::Enter if elapsed < EDGE_RUN => AnimationState::MovingToEdge,
            Phase::Enter => AnimationState::Looping,
            Phase::Return if elapsed < RETURN_RUN => AnimationState::ReturningToCenter,
            Phase::Return | Phase::Stopped => AnimationState::AtRest,
        }
    }

    /// Lifecycle state of the span under a hoverable element.
    pub fn state_of<S: StyleSurface + ?Sized>(
        &self,
        surface: &S,
        element: ElementId,
        now: Instant,
    ) -> AnimationState {
        surface
            .first_text_child(element)
            .map(|text| self.state(text, now))
            .unwrap_or(AnimationState::AtRest)
    }

    fn apply_return<S: StyleSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: ElementId,
        position: &ComputedPosition,
        now: Instant,
    ) {
        surface.set_custom_property(text, CURRENT_LEFT_VAR, &position.left);
        surface.set_custom_property(text, CURRENT_TRANSFORM_VAR, &position.transform);
        surface.set_animation(text, &return_animation().to_string(), now);
        self.record(text, Phase::Return, now);
    }

    fn record(&mut self, text: ElementId, phase: Phase, now: Instant) {
        log::trace!("marquee {text:?} -> {phase:?}");
        self.transitions.insert(text, Transition { phase, since: now });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use style::StyleTree;

    fn tree_with_button() -> (StyleTree, ElementId, ElementId) {
        let mut tree = StyleTree::new();
        let button = tree.create("button");
        let span = tree.append_child(button, "span");
        tree.set_travel(span, 100.0);
        (tree, button, span)
    }

    #[test]
    fn begin_hover_applies_two_stage_animation() {
        let (mut tree, button, span) = tree_with_button();
        let mut c = HoverAnimationCoordinator::new();
        let t0 = Instant::now();

        assert_eq!(c.begin_hover(&mut tree, button, t0), Some(span));
        assert_eq!(
            tree.animation(span),
            Some("centerToLeft 2s linear 1, rightToLeft 3s linear infinite 2s")
        );
        assert_eq!(c.state(span, t0), AnimationState::MovingToEdge);
        assert_eq!(
            c.state(span, t0 + Duration::from_millis(1999)),
            AnimationState::MovingToEdge
        );
        assert_eq!(c.state(span, t0 + Duration::from_secs(2)), AnimationState::Looping);
        assert_eq!(c.state(span, t0 + Duration::from_secs(60)), AnimationState::Looping);
    }

    #[test]
    fn end_hover_stores_captured_position() {
        let (mut tree, button, span) = tree_with_button();
        let mut c = HoverAnimationCoordinator::new();
        let t0 = Instant::now();

        c.begin_hover(&mut tree, button, t0);
        let position = ComputedPosition {
            left: "0px".into(),
            transform: "matrix(1, 0, 0, 1, 25, 0)".into(),
        };
        let t1 = t0 + Duration::from_millis(3250);
        c.end_hover(&mut tree, button, &position, t1);

        assert_eq!(tree.custom_property(span, CURRENT_LEFT_VAR), Some("0px"));
        assert_eq!(
            tree.custom_property(span, CURRENT_TRANSFORM_VAR),
            Some("matrix(1, 0, 0, 1, 25, 0)")
        );
        assert_eq!(tree.animation(span), Some("returnToCenter 0.5s forwards"));
        assert_eq!(c.state(span, t1), AnimationState::ReturningToCenter);
        assert_eq!(c.state(span, t1 + Duration::from_millis(500)), AnimationState::AtRest);

        // The return starts exactly where the loop was.
        let start = tree.computed_position(span, t1).unwrap();
        assert_eq!(start.transform, "matrix(1, 0, 0, 1, 25, 0)");
        let end = tree.computed_position(span, t1 + Duration::from_secs(1)).unwrap();
        assert_eq!(end.transform, "matrix(1, 0, 0, 1, 0, 0)");
    }

    #[test]
    fn end_hover_from_computed_reads_the_loop_position() {
        let (mut tree, button, span) = tree_with_button();
        let mut c = HoverAnimationCoordinator::new();
        let t0 = Instant::now();

        c.begin_hover(&mut tree, button, t0);
        // 1.5s into the loop: halfway from +100 to -100.
        let t1 = t0 + Duration::from_millis(3500);
        c.end_hover_from_computed(&mut tree, button, t1);

        assert_eq!(
            tree.custom_property(span, CURRENT_TRANSFORM_VAR),
            Some("matrix(1, 0, 0, 1, 0, 0)")
        );
    }

    #[test]
    fn missing_targets_are_silent_no_ops() {
        let mut tree = StyleTree::new();
        let bare = tree.create("button");
        let mut c = HoverAnimationCoordinator::new();
        let t0 = Instant::now();

        assert_eq!(c.begin_hover(&mut tree, bare, t0), None);
        assert_eq!(c.end_hover_from_computed(&mut tree, bare, t0), None);
        assert_eq!(c.begin_hover(&mut tree, ElementId(404), t0), None);
        assert_eq!(tree.animation(bare), Some(""));
        assert_eq!(c.state_of(&tree, bare, t0), AnimationState::AtRest);
    }

    #[test]
    fn stop_then_rearm_allows_a_fresh_start() {
        let (mut tree, button, span) = tree_with_button();
        let mut c = HoverAnimationCoordinator::new();
        let t0 = Instant::now();

        c.begin_hover(&mut tree, button, t0);
        assert_eq!(c.stop(&mut tree, button, t0), Some(span));
        assert_eq!(tree.animation(span), Some("none"));
        c.rearm(&mut tree, span, t0 + Duration::from_millis(16));
        assert_eq!(tree.animation(span), Some(""));
        assert_eq!(c.state(span, t0), AnimationState::AtRest);

        let t2 = t0 + Duration::from_secs(1);
        c.begin_hover(&mut tree, button, t2);
        assert_eq!(tree.animation_started(span), Some(t2));
    }
}

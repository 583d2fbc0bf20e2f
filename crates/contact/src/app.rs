use std::collections::HashSet;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use animation::{AnimationState, HoverAnimationCoordinator};
use bus::{Bus, CoreCommand};
use core_types::{ElementId, FieldKey};
use form_core::{DraftStore, GrowSurface, HeightRule, SharedViewport};
use i18n::{LocaleError, Localizer, PreferenceStore};
use net::{HttpTransport, Transport};
use runtime_net::start_net_runtime;
use style::{StyleSurface, parse_translate_x};

use crate::config::{ConfigError, ContactConfig, TransportMode};
use crate::form::ContactForm;
use crate::labels::LabelTrio;
use crate::page::ContactPage;
use crate::sequencer::{Dispatch, SubmissionSequencer, SubmitOutcome, Surfaces};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not load translations: {0}")]
    Locale(#[from] LocaleError),
}

struct NetRuntime {
    bus: Bus,
    handle: Option<JoinHandle<()>>,
}

/// The contact section, headless: page elements, form state, hover
/// animations, submission and language switching.
///
/// A host feeds it pointer, input and time; the egui host lives in `view`.
pub struct ContactApp {
    localizer: Localizer,
    prefs: Box<dyn PreferenceStore>,
    viewport: SharedViewport,
    page: ContactPage,
    form: ContactForm,
    hover: HoverAnimationCoordinator,
    labels: LabelTrio,
    sequencer: SubmissionSequencer,
    net: Option<NetRuntime>,
    hovered: HashSet<ElementId>,
    // Leaves that arrived while their element was disabled.
    deferred_leaves: HashSet<ElementId>,
    strings_rev: u64,
}

impl ContactApp {
    /// Live mode posts over HTTP; simulated mode never touches the network.
    pub fn new(
        config: &ContactConfig,
        prefs: Box<dyn PreferenceStore>,
        viewport_width: f32,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let transport: Option<Arc<dyn Transport>> = match config.transport.mode {
            TransportMode::Live => Some(Arc::new(HttpTransport::new(config.transport.timeout()))),
            TransportMode::Simulated => None,
        };
        Self::build(config, prefs, viewport_width, transport)
    }

    /// Live dispatch through `transport`, whatever the configured mode.
    pub fn with_transport(
        config: &ContactConfig,
        prefs: Box<dyn PreferenceStore>,
        viewport_width: f32,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, StartupError> {
        Self::build(config, prefs, viewport_width, Some(transport))
    }

    fn build(
        config: &ContactConfig,
        prefs: Box<dyn PreferenceStore>,
        viewport_width: f32,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self, StartupError> {
        let localizer = Localizer::from_preferences(prefs.as_ref())?;
        let viewport = SharedViewport::new(viewport_width);
        let rule = HeightRule {
            breakpoint_px: config.layout.compact_breakpoint,
            ..HeightRule::default()
        };
        let page = ContactPage::build(&localizer);
        let form = ContactForm::new(
            DraftStore::with_rule(viewport.clone(), rule),
            page.fields,
            &localizer,
        );

        let (dispatch, net) = match transport {
            Some(transport) => {
                let (bus, cmd_rx) = Bus::new();
                let handle = start_net_runtime(transport, cmd_rx, bus.evt_tx.clone());
                let dispatch = Dispatch::Live {
                    endpoint: config.transport.endpoint.clone(),
                    headers: config.transport.header_list(),
                    cmd_tx: bus.cmd_tx.clone(),
                };
                (
                    dispatch,
                    Some(NetRuntime {
                        bus,
                        handle: Some(handle),
                    }),
                )
            }
            None => (Dispatch::Simulated, None),
        };
        log::info!(
            "contact form ready ({}, language {})",
            if net.is_some() { "live" } else { "simulated" },
            localizer.active()
        );

        Ok(Self {
            strings_rev: localizer.revision(),
            labels: page.label_trio(),
            localizer,
            prefs,
            viewport,
            page,
            form,
            hover: HoverAnimationCoordinator::new(),
            sequencer: SubmissionSequencer::new(dispatch, &config.timing),
            net,
            hovered: HashSet::new(),
            deferred_leaves: HashSet::new(),
        })
    }

    /// Advance timers, then apply whatever the network runtime reported.
    pub fn frame(&mut self, now: Instant) {
        let mut s = Surfaces {
            form: &mut self.form,
            tree: &mut self.page.tree,
            hover: &mut self.hover,
            submit: self.page.submit,
        };
        self.sequencer.tick(&mut s, now);
        if let Some(net) = &self.net {
            while let Ok(evt) = net.bus.evt_rx.try_recv() {
                self.sequencer.on_event(&evt, &mut s, now);
            }
        }
        self.replay_deferred_leaves(now);
    }

    fn replay_deferred_leaves(&mut self, now: Instant) {
        if self.deferred_leaves.is_empty() {
            return;
        }
        let enabled: Vec<ElementId> = self
            .deferred_leaves
            .iter()
            .copied()
            .filter(|&id| !self.page.tree.is_disabled(id))
            .collect();
        for element in enabled {
            self.deferred_leaves.remove(&element);
            log::trace!("replaying leave on re-enabled {element:?}");
            self.pointer_leave(element, now);
        }
    }

    /// Whether `element`'s caption is still marching toward or around the edge.
    fn marquee_running(&self, element: ElementId, now: Instant) -> bool {
        self.page
            .tree
            .first_text_child(element)
            .is_some_and(|span| {
                matches!(
                    self.hover.state(span, now),
                    AnimationState::MovingToEdge | AnimationState::Looping
                )
            })
    }

    pub fn pointer_enter(&mut self, element: ElementId, now: Instant) {
        if self.page.tree.is_disabled(element) {
            log::trace!("hover on disabled {element:?} ignored");
            self.deferred_leaves.remove(&element);
            return;
        }
        if element == self.page.submit {
            self.form.validate_all(true);
        }
        if self.page.marquee_buttons().contains(&element) {
            self.hover.begin_hover(&mut self.page.tree, element, now);
        }
        if element == self.page.labels[1] {
            self.labels.set_hover(&mut self.page.tree, true);
        }
    }

    pub fn pointer_leave(&mut self, element: ElementId, now: Instant) {
        if self.page.tree.is_disabled(element) {
            log::trace!("leave on disabled {element:?} deferred");
            self.deferred_leaves.insert(element);
            return;
        }
        if element == self.page.submit {
            self.form.validate_all(false);
        }
        if self.page.marquee_buttons().contains(&element) && self.marquee_running(element, now) {
            self.hover
                .end_hover_from_computed(&mut self.page.tree, element, now);
        }
        if element == self.page.labels[1] {
            self.labels.set_hover(&mut self.page.tree, false);
        }
    }

    /// Report whether the pointer is over `element` this frame; enter/leave
    /// fire on changes only.
    pub fn track_hover(&mut self, element: ElementId, hovered: bool, now: Instant) {
        if hovered == self.hovered.contains(&element) {
            return;
        }
        if hovered {
            self.hovered.insert(element);
            self.pointer_enter(element, now);
        } else {
            self.hovered.remove(&element);
            self.pointer_leave(element, now);
        }
    }

    pub fn input(&mut self, key: FieldKey, value: String) {
        self.form.on_input(key, value);
    }

    pub fn set_privacy(&mut self, checked: bool) {
        self.form.on_checkbox(checked);
    }

    pub fn grow_message<S: GrowSurface + ?Sized>(&mut self, surface: &mut S) -> String {
        self.form.grow_message(surface)
    }

    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        let mut s = Surfaces {
            form: &mut self.form,
            tree: &mut self.page.tree,
            hover: &mut self.hover,
            submit: self.page.submit,
        };
        self.sequencer.submit(&mut s, now)
    }

    /// Switch language, remember it, and re-render every localized string.
    pub fn set_language(&mut self, lang: &str) {
        if let Err(err) = self.localizer.set_language(self.prefs.as_mut(), lang) {
            log::warn!("language switch to {lang} failed: {err}");
        }
        self.refresh_strings();
    }

    fn refresh_strings(&mut self) {
        if self.localizer.revision() == self.strings_rev {
            return;
        }
        self.strings_rev = self.localizer.revision();
        self.page.apply_strings(&self.localizer);
        self.form.refresh_strings(&self.localizer);
    }

    /// Record the new viewport width. An untouched message box follows it.
    pub fn resize(&mut self, width: f32) {
        self.viewport.set_width(width);
        self.form.refit_message_height();
    }

    /// Current horizontal offset of a marquee button's caption, in px.
    pub fn marquee_offset(&self, button: ElementId, now: Instant) -> f32 {
        self.page
            .tree
            .first_text_child(button)
            .and_then(|span| self.page.tree.computed_position(span, now))
            .and_then(|pos| parse_translate_x(&pos.transform))
            .unwrap_or(0.0)
    }

    /// Distance a caption travels from center to the button edge.
    pub fn set_marquee_travel(&mut self, button: ElementId, travel_px: f32) {
        if let Some(span) = self.page.tree.first_text_child(button) {
            self.page.tree.set_travel(span, travel_px);
        }
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn page(&self) -> &ContactPage {
        &self.page
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn hover(&self) -> &HoverAnimationCoordinator {
        &self.hover
    }

    pub fn sequencer(&self) -> &SubmissionSequencer {
        &self.sequencer
    }

    /// Cancel banner timers and stop the network runtime. Idempotent.
    pub fn shutdown(&mut self) {
        self.sequencer.teardown();
        if let Some(mut net) = self.net.take() {
            let _ = net.bus.cmd_tx.send(CoreCommand::Shutdown);
            if let Some(handle) = net.handle.take()
                && handle.join().is_err()
            {
                log::error!("network runtime panicked");
            }
        }
    }
}

impl Drop for ContactApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

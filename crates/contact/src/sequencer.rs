//! Submission state machine: validate, dispatch (or not), then the timed
//! success banner.
//!
//! ```text
//! Idle --submit--> Rejected                      (any field invalid)
//!      --submit--> AcceptedSending --Sent-->  success sequence
//!                                  --Failed--> Idle (draft kept, retry shown)
//!      --submit--> AcceptedImmediate -------> success sequence
//!
//! success sequence: SuccessVisible --visible--> SuccessFading --fading--> Idle
//! ```

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use animation::HoverAnimationCoordinator;
use bus::{CoreCommand, CoreEvent};
use core_types::{ElementId, RequestId};
use style::StyleTree;

use crate::config::TimingConfig;
use crate::form::{ContactForm, FieldReport};
use crate::timers::TimerQueue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Rejected(Vec<FieldReport>),
    AcceptedSending { request_id: RequestId },
    AcceptedImmediate,
    SuccessVisible,
    SuccessFading,
}

/// How accepted submissions leave the form.
#[derive(Debug)]
pub enum Dispatch {
    /// Hand the message to the network runtime.
    Live {
        endpoint: String,
        headers: Vec<(String, String)>,
        cmd_tx: Sender<CoreCommand>,
    },
    /// Skip the network and go straight to the success sequence.
    Simulated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    Sending(RequestId),
    Immediate,
    /// The message could not even be handed to the runtime.
    DispatchFailed,
    /// A message is in flight, or the sequencer was torn down.
    Ignored,
}

/// Everything a submission touches, borrowed for the duration of one call.
pub struct Surfaces<'a> {
    pub form: &'a mut ContactForm,
    pub tree: &'a mut StyleTree,
    pub hover: &'a mut HoverAnimationCoordinator,
    pub submit: ElementId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BannerTimer {
    BeginFade,
    Hide,
}

#[derive(Debug)]
pub struct SubmissionSequencer {
    state: SubmissionState,
    dispatch: Dispatch,
    visible_for: Duration,
    fading_for: Duration,
    timers: TimerQueue<BannerTimer>,
    next_request: RequestId,
    in_flight: Option<RequestId>,
    /// Submit button span stopped by the last success sequence, cleared on the following tick.
    pending_rearm: Option<ElementId>,
    fading_since: Option<Instant>,
    retry: bool,
    torn_down: bool,
}

impl SubmissionSequencer {
    pub fn new(dispatch: Dispatch, timing: &TimingConfig) -> Self {
        Self {
            state: SubmissionState::Idle,
            dispatch,
            visible_for: timing.success_visible(),
            fading_for: timing.success_fading(),
            timers: TimerQueue::new(),
            next_request: 1,
            in_flight: None,
            pending_rearm: None,
            fading_since: None,
            retry: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The last live dispatch failed; the form should offer to try again.
    pub fn needs_retry(&self) -> bool {
        self.retry
    }

    pub fn banner_visible(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::SuccessVisible | SubmissionState::SuccessFading
        )
    }

    /// 1.0 while the banner is fully shown, falling to 0.0 across the fade.
    pub fn banner_opacity(&self, now: Instant) -> f32 {
        match self.state {
            SubmissionState::SuccessVisible => 1.0,
            SubmissionState::SuccessFading => {
                let Some(since) = self.fading_since else {
                    return 0.0;
                };
                if self.fading_for.is_zero() {
                    return 0.0;
                }
                let t = now.saturating_duration_since(since).as_secs_f32()
                    / self.fading_for.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn submit(&mut self, s: &mut Surfaces<'_>, now: Instant) -> SubmitOutcome {
        if self.torn_down {
            return SubmitOutcome::Ignored;
        }
        if let Some(id) = self.in_flight {
            log::debug!("submit ignored: message {id} still in flight");
            return SubmitOutcome::Ignored;
        }
        if self.banner_visible() {
            self.timers.cancel_all();
        }
        self.retry = false;

        let reports = s.form.validate_all(true);
        if reports.iter().any(|r| r.invalid) {
            log::debug!(
                "submission rejected: {:?}",
                reports
                    .iter()
                    .filter(|r| r.invalid)
                    .map(|r| r.field)
                    .collect::<Vec<_>>()
            );
            self.state = SubmissionState::Rejected(reports);
            return SubmitOutcome::Rejected;
        }

        match &self.dispatch {
            Dispatch::Simulated => {
                log::info!("submission accepted (simulated transport)");
                self.state = SubmissionState::AcceptedImmediate;
                self.run_success(s, now);
                SubmitOutcome::Immediate
            }
            Dispatch::Live {
                endpoint,
                headers,
                cmd_tx,
            } => {
                let payload = match s.form.payload().to_json() {
                    Ok(p) => p,
                    Err(e) => {
                        log::error!("could not encode message: {e}");
                        self.fail();
                        return SubmitOutcome::DispatchFailed;
                    }
                };
                let request_id = self.next_request;
                self.next_request = self.next_request.wrapping_add(1).max(1);

                let cmd = CoreCommand::SendMessage {
                    request_id,
                    endpoint: endpoint.clone(),
                    payload,
                    headers: headers.clone(),
                };
                if cmd_tx.send(cmd).is_err() {
                    log::error!("network runtime is gone; message {request_id} not sent");
                    self.fail();
                    return SubmitOutcome::DispatchFailed;
                }

                log::info!("submission accepted, sending message {request_id} to {endpoint}");
                self.in_flight = Some(request_id);
                s.tree.set_disabled(s.submit, true);
                self.state = SubmissionState::AcceptedSending { request_id };
                SubmitOutcome::Sending(request_id)
            }
        }
    }

    pub fn on_event(&mut self, evt: &CoreEvent, s: &mut Surfaces<'_>, now: Instant) {
        if self.torn_down {
            return;
        }
        match evt {
            CoreEvent::MessageSent { request_id, status } => {
                if !self.awaiting(*request_id) {
                    log::trace!("stale MessageSent for {request_id}");
                    return;
                }
                log::info!("message {request_id} sent ({status})");
                self.run_success(s, now);
            }
            CoreEvent::MessageFailed { request_id, error } => {
                if !self.awaiting(*request_id) {
                    log::trace!("stale MessageFailed for {request_id}");
                    return;
                }
                log::error!("message {request_id} failed: {error}; draft kept");
                self.fail();
            }
            CoreEvent::MessageDone { request_id } => {
                if self.in_flight != Some(*request_id) {
                    return;
                }
                self.in_flight = None;
                s.tree.set_disabled(s.submit, false);
                if self.awaiting(*request_id) {
                    log::warn!("message {request_id} finished without an outcome");
                    self.fail();
                }
            }
        }
    }

    /// Advance to `now`: finish a pending animation reset and fire due banner timers.
    pub fn tick(&mut self, s: &mut Surfaces<'_>, now: Instant) {
        if self.torn_down {
            return;
        }
        if let Some(span) = self.pending_rearm.take() {
            s.hover.rearm(s.tree, span, now);
        }

        loop {
            let fired = self.timers.due(now);
            if fired.is_empty() {
                break;
            }
            for f in fired {
                match f.kind {
                    BannerTimer::BeginFade if self.state == SubmissionState::SuccessVisible => {
                        log::debug!("success banner fading");
                        self.state = SubmissionState::SuccessFading;
                        self.fading_since = Some(f.deadline);
                        self.timers
                            .schedule_at(f.deadline + self.fading_for, BannerTimer::Hide);
                    }
                    BannerTimer::Hide if self.state == SubmissionState::SuccessFading => {
                        log::debug!("success banner removed");
                        self.state = SubmissionState::Idle;
                        self.fading_since = None;
                    }
                    kind => log::trace!("{kind:?} fired in {:?}, ignored", self.state),
                }
            }
        }
    }

    /// Cancel pending timers; later calls do nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::debug!("teardown cancelled {cancelled} banner timer(s)");
        }
        self.pending_rearm = None;
        self.torn_down = true;
    }

    fn awaiting(&self, request_id: RequestId) -> bool {
        self.state == SubmissionState::AcceptedSending { request_id }
    }

    fn fail(&mut self) {
        self.retry = true;
        self.state = SubmissionState::Idle;
    }

    fn run_success(&mut self, s: &mut Surfaces<'_>, now: Instant) {
        s.form.clear_draft();
        self.pending_rearm = s.hover.stop(s.tree, s.submit, now);
        s.form.reset_pristine();

        self.timers.cancel_all();
        self.fading_since = None;
        self.state = SubmissionState::SuccessVisible;
        self.timers.schedule(now, self.visible_for, BannerTimer::BeginFade);
    }
}

impl Drop for SubmissionSequencer {
    fn drop(&mut self) {
        self.teardown();
    }
}

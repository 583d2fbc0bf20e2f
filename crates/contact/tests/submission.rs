use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use contact::{ContactApp, ContactConfig, FieldReport, SubmissionState, SubmitOutcome};
use core_types::FieldKey;
use i18n::{FilePreferences, LANG_KEY, MemoryPreferences, PreferenceStore, keys};
use net::SimulatedTransport;
use style::StyleSurface;

fn simulated_app() -> ContactApp {
    ContactApp::new(&ContactConfig::default(), Box::new(MemoryPreferences::new()), 1280.0).unwrap()
}

fn fill_valid(app: &mut ContactApp) {
    app.input(FieldKey::Name, "Ada Lovelace".into());
    app.input(FieldKey::Email, "ada@example.org".into());
    app.input(FieldKey::Message, "Let's build an engine.".into());
    app.set_privacy(true);
}

/// Pump frames until `done` holds or a few seconds pass.
fn pump_until(app: &mut ContactApp, mut done: impl FnMut(&ContactApp) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(app) {
        assert!(Instant::now() < deadline, "timed out in {:?}", app.sequencer().state());
        app.frame(Instant::now());
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn invalid_draft_is_rejected_without_dispatch() {
    let transport = Arc::new(SimulatedTransport::succeeding());
    let mut app = ContactApp::with_transport(
        &ContactConfig::default(),
        Box::new(MemoryPreferences::new()),
        1280.0,
        transport.clone(),
    )
    .unwrap();
    app.input(FieldKey::Name, String::new());
    app.input(FieldKey::Email, "a@b".into());
    app.input(FieldKey::Message, "hi".into());

    assert_eq!(app.submit(Instant::now()), SubmitOutcome::Rejected);

    let expected = vec![
        FieldReport { field: FieldKey::Name, invalid: true },
        FieldReport { field: FieldKey::Email, invalid: true },
        FieldReport { field: FieldKey::Message, invalid: false },
        FieldReport { field: FieldKey::Privacy, invalid: true },
    ];
    assert_eq!(app.sequencer().state(), &SubmissionState::Rejected(expected));
    assert!(app.form().agreement_warning());
    assert_eq!(app.form().value(FieldKey::Email), "");

    app.frame(Instant::now());
    thread::sleep(Duration::from_millis(20));
    app.frame(Instant::now());
    assert_eq!(transport.sent(), 0);
}

#[test]
fn simulated_success_sequence_has_exact_timing() {
    let mut app = simulated_app();
    fill_valid(&mut app);
    let t0 = Instant::now();

    assert_eq!(app.submit(t0), SubmitOutcome::Immediate);
    assert_eq!(app.sequencer().state(), &SubmissionState::SuccessVisible);

    let draft = app.form().draft();
    assert_eq!(draft.name, "");
    assert_eq!(draft.email, "");
    assert_eq!(draft.message, "");
    assert_eq!(draft.message_height, "40px");
    assert!(app.form().controls().is_pristine());

    let ms = |n| t0 + Duration::from_millis(n);
    app.frame(ms(2999));
    assert_eq!(app.sequencer().state(), &SubmissionState::SuccessVisible);
    app.frame(ms(3000));
    assert_eq!(app.sequencer().state(), &SubmissionState::SuccessFading);
    app.frame(ms(3499));
    assert_eq!(app.sequencer().state(), &SubmissionState::SuccessFading);
    app.frame(ms(3500));
    assert_eq!(app.sequencer().state(), &SubmissionState::Idle);
    assert!(!app.sequencer().banner_visible());
}

#[test]
fn rejected_form_can_be_resubmitted() {
    let mut app = simulated_app();
    assert_eq!(app.submit(Instant::now()), SubmitOutcome::Rejected);

    fill_valid(&mut app);
    assert_eq!(app.submit(Instant::now()), SubmitOutcome::Immediate);
}

#[test]
fn live_transport_round_trip() {
    let transport = Arc::new(SimulatedTransport::succeeding());
    let mut app = ContactApp::with_transport(
        &ContactConfig::default(),
        Box::new(MemoryPreferences::new()),
        600.0,
        transport.clone(),
    )
    .unwrap();
    fill_valid(&mut app);

    let submit = app.page().submit;
    assert_eq!(app.submit(Instant::now()), SubmitOutcome::Sending(1));
    assert!(app.page().tree.is_disabled(submit));
    assert_eq!(app.submit(Instant::now()), SubmitOutcome::Ignored);

    pump_until(&mut app, |a| !a.sequencer().is_sending());
    assert_eq!(app.sequencer().state(), &SubmissionState::SuccessVisible);
    assert!(!app.page().tree.is_disabled(submit));
    assert_eq!(app.form().draft().message_height, "22px");
    assert_eq!(transport.sent(), 1);
}

#[test]
fn transport_failure_keeps_the_draft() {
    let transport = Arc::new(SimulatedTransport::failing("connection refused"));
    let mut app = ContactApp::with_transport(
        &ContactConfig::default(),
        Box::new(MemoryPreferences::new()),
        1280.0,
        transport,
    )
    .unwrap();
    fill_valid(&mut app);

    assert!(matches!(app.submit(Instant::now()), SubmitOutcome::Sending(_)));
    pump_until(&mut app, |a| !a.sequencer().is_sending());

    assert_eq!(app.sequencer().state(), &SubmissionState::Idle);
    assert!(app.sequencer().needs_retry());
    let draft = app.form().draft();
    assert_eq!(draft.name, "Ada Lovelace");
    assert_eq!(draft.email, "ada@example.org");
    assert_eq!(draft.message, "Let's build an engine.");
    assert_eq!(app.form().value(FieldKey::Name), "Ada Lovelace");
}

#[test]
fn shutdown_cancels_pending_banner_timers() {
    let mut app = simulated_app();
    fill_valid(&mut app);
    let t0 = Instant::now();
    app.submit(t0);
    assert!(app.sequencer().next_deadline().is_some());

    app.shutdown();
    assert!(app.sequencer().next_deadline().is_none());
    app.frame(t0 + Duration::from_secs(5));
    assert_eq!(app.sequencer().state(), &SubmissionState::SuccessVisible);
}

#[test]
fn hovering_submit_surfaces_errors_and_leaving_hides_them() {
    let mut app = simulated_app();
    let submit = app.page().submit;
    let t0 = Instant::now();

    app.track_hover(submit, true, t0);
    assert!(app.form().has_error(FieldKey::Name));
    assert_eq!(
        app.form().placeholder(FieldKey::Name),
        app.localizer().translate(keys::NAME_ERROR)
    );

    app.track_hover(submit, false, t0 + Duration::from_millis(100));
    assert!(!app.form().has_error(FieldKey::Name));
    // the agreement warning outlives the hover
    assert!(app.form().agreement_warning());
}

#[test]
fn disabled_submit_ignores_hover() {
    let transport = Arc::new(SimulatedTransport::succeeding());
    let mut app = ContactApp::with_transport(
        &ContactConfig::default(),
        Box::new(MemoryPreferences::new()),
        1280.0,
        transport,
    )
    .unwrap();
    fill_valid(&mut app);
    let t0 = Instant::now();
    app.submit(t0);

    let submit = app.page().submit;
    let span = app.page().tree.first_text_child(submit).unwrap();
    app.pointer_enter(submit, t0);
    assert_eq!(app.page().tree.animation(span), Some(""));
}

#[test]
fn marquee_returns_from_where_the_loop_was() {
    let mut app = simulated_app();
    let button = app.page().hero.contact_me;
    app.set_marquee_travel(button, 100.0);
    let t0 = Instant::now();

    app.track_hover(button, true, t0);
    // halfway to the left edge
    let mid = t0 + Duration::from_millis(1000);
    assert!((app.marquee_offset(button, mid) + 50.0).abs() < 0.01);

    app.track_hover(button, false, mid);
    assert!((app.marquee_offset(button, mid) + 50.0).abs() < 0.01);
    assert_eq!(app.marquee_offset(button, mid + Duration::from_millis(500)), 0.0);
}

#[test]
fn language_choice_is_persisted_and_restored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    {
        let prefs = FilePreferences::open(&path).unwrap();
        let mut app = ContactApp::new(&ContactConfig::default(), Box::new(prefs), 1280.0).unwrap();
        app.set_language("de");
        assert_eq!(app.form().placeholder(FieldKey::Name), "Dein Name");
        assert_eq!(app.page().caption(app.page().submit), "Sag Hallo ;)");
    }

    let prefs = FilePreferences::open(&path).unwrap();
    assert_eq!(prefs.get(LANG_KEY).as_deref(), Some("de"));
    let app = ContactApp::new(&ContactConfig::default(), Box::new(prefs), 1280.0).unwrap();
    assert_eq!(app.localizer().active(), "de");
}

#[test]
fn message_box_growth_is_persisted_and_idempotent() {
    struct Box2 {
        writes: Vec<String>,
        content: f32,
    }
    impl form_core::GrowSurface for Box2 {
        fn set_height(&mut self, height: &str) {
            self.writes.push(height.to_string());
        }
        fn scroll_height(&self) -> f32 {
            self.content
        }
    }

    let mut app = simulated_app();
    let mut ta = Box2 {
        writes: Vec::new(),
        content: 64.0,
    };
    let first = app.grow_message(&mut ta);
    let second = app.grow_message(&mut ta);
    assert_eq!(first, "64px");
    assert_eq!(first, second);
    assert_eq!(ta.writes, vec!["0px", "64px", "0px", "64px"]);
    assert_eq!(app.form().draft().message_height, "64px");
}

#[test]
fn first_resize_refits_an_untouched_message_box() {
    let mut app = simulated_app();
    assert_eq!(app.form().draft().message_height, "40px");

    app.resize(600.0);
    app.frame(Instant::now());
    assert_eq!(app.form().draft().message_height, "22px");
}

#[test]
fn resize_keeps_a_grown_message_box() {
    struct Fixed(f32);
    impl form_core::GrowSurface for Fixed {
        fn set_height(&mut self, _height: &str) {}
        fn scroll_height(&self) -> f32 {
            self.0
        }
    }

    let mut app = simulated_app();
    app.grow_message(&mut Fixed(120.0));
    app.resize(600.0);
    assert_eq!(app.form().draft().message_height, "120px");

    // a successful send starts over from the viewport rule
    fill_valid(&mut app);
    app.submit(Instant::now());
    assert_eq!(app.form().draft().message_height, "22px");
}

#[test]
fn leaving_a_disabled_submit_stops_the_marquee_once_enabled() {
    let transport = Arc::new(SimulatedTransport::failing("connection refused"));
    let mut app = ContactApp::with_transport(
        &ContactConfig::default(),
        Box::new(MemoryPreferences::new()),
        1280.0,
        transport,
    )
    .unwrap();
    fill_valid(&mut app);
    let submit = app.page().submit;
    let span = app.page().tree.first_text_child(submit).unwrap();

    app.track_hover(submit, true, Instant::now());
    assert!(matches!(app.submit(Instant::now()), SubmitOutcome::Sending(_)));
    app.track_hover(submit, false, Instant::now());
    assert!(app.page().tree.animation(span).unwrap().starts_with("centerToLeft"));

    pump_until(&mut app, |a| !a.page().tree.is_disabled(submit));
    assert!(app.sequencer().needs_retry());
    assert!(app.page().tree.animation(span).unwrap().starts_with("returnToCenter"));
}

#[test]
fn returning_pointer_cancels_the_deferred_leave() {
    let transport = Arc::new(SimulatedTransport::failing("connection refused"));
    let mut app = ContactApp::with_transport(
        &ContactConfig::default(),
        Box::new(MemoryPreferences::new()),
        1280.0,
        transport,
    )
    .unwrap();
    fill_valid(&mut app);
    let submit = app.page().submit;
    let span = app.page().tree.first_text_child(submit).unwrap();

    app.track_hover(submit, true, Instant::now());
    app.submit(Instant::now());
    app.track_hover(submit, false, Instant::now());
    app.track_hover(submit, true, Instant::now());

    pump_until(&mut app, |a| !a.page().tree.is_disabled(submit));
    assert!(app.page().tree.animation(span).unwrap().starts_with("centerToLeft"));
}

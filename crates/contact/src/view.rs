use std::time::Instant;

use app_api::UiApp;
use core_types::{ElementId, FieldKey};
use egui::{
    Align2, CentralPanel, Color32, Context, FontId, Frame, Margin, Pos2, Rect, RichText,
    ScrollArea, Sense, Stroke, StrokeKind, TextEdit, TopBottomPanel, Ui, Vec2,
};
use form_core::GrowSurface;
use i18n::{SUPPORTED_LANGS, keys};
use style::{Length, parse_length};

use crate::app::ContactApp;

const ACCENT: Color32 = Color32::from_rgb(0x3D, 0xCF, 0xB6);
const ERROR: Color32 = Color32::from_rgb(0xE6, 0x1C, 0x40);
const BUTTON_SIZE: Vec2 = Vec2::new(220.0, 48.0);
const CAPTION_PX: f32 = 18.0;
const FIELD_PX: f32 = 16.0;
// Vertical padding the message box adds around its text.
const TEXTAREA_PADDING: f32 = 8.0;

/// Measures the message box the way a browser reports `scrollHeight`.
///
/// The height itself is applied from the draft on the next frame.
struct MessageBox {
    content_height: f32,
}

impl GrowSurface for MessageBox {
    fn set_height(&mut self, _height: &str) {}

    fn scroll_height(&self) -> f32 {
        self.content_height
    }
}

impl UiApp for ContactApp {
    fn ui(&mut self, ctx: &Context, now: Instant) {
        self.frame(now);

        TopBottomPanel::top("lang").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for lang in SUPPORTED_LANGS {
                    let active = self.localizer().active() == lang;
                    if ui
                        .selectable_label(active, lang.to_ascii_uppercase())
                        .clicked()
                    {
                        self.set_language(lang);
                    }
                }
            });
        });

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(24.0);
                ui.horizontal(|ui| {
                    let hero = self.page().hero;
                    marquee_button(self, ui, hero.check_work, now);
                    ui.add_space(16.0);
                    marquee_button(self, ui, hero.contact_me, now);
                });
                ui.add_space(48.0);
                contact_form(self, ui, now);
            });
        });
    }

    fn on_resize(&mut self, width_px: f32) {
        self.resize(width_px);
    }

    fn shutdown(&mut self) {
        ContactApp::shutdown(self);
    }
}

/// A button whose caption scrolls while hovered. Returns `true` when clicked.
fn marquee_button(app: &mut ContactApp, ui: &mut Ui, button: ElementId, now: Instant) -> bool {
    let disabled = app.page().tree.is_disabled(button);
    let sense = if disabled { Sense::hover() } else { Sense::click() };
    let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, sense);
    app.track_hover(button, response.hovered(), now);

    let caption = app.page().caption(button).to_string();
    let color = if disabled {
        ui.visuals().weak_text_color()
    } else {
        ACCENT
    };
    let galley = ui.fonts(|f| f.layout_no_wrap(caption, FontId::proportional(CAPTION_PX), color));
    app.set_marquee_travel(button, (rect.width() + galley.size().x) / 2.0);

    let painter = ui.painter_at(rect);
    painter.rect_stroke(rect, 8.0, Stroke::new(1.0, color), StrokeKind::Inside);
    let x = app.marquee_offset(button, now);
    let pos = rect.center() - galley.size() / 2.0 + Vec2::new(x, 0.0);
    painter.galley(pos, galley, color);

    response.clicked()
}

fn contact_form(app: &mut ContactApp, ui: &mut Ui, now: Instant) {
    let labels = app.page().labels;
    let fields = [FieldKey::Name, FieldKey::Email, FieldKey::Message];
    for (label, key) in labels.into_iter().zip(fields) {
        let rect = Frame::new()
            .inner_margin(Margin::symmetric(0, 8))
            .show(ui, |ui| {
                if key == FieldKey::Message {
                    message_field(app, ui);
                } else {
                    text_field(app, ui, key);
                }
            })
            .response
            .rect;
        let hovered = ui.rect_contains_pointer(rect);
        app.track_hover(label, hovered, now);
        paint_label_borders(app, ui, label, rect);
    }

    ui.add_space(12.0);
    privacy_row(app, ui);
    ui.add_space(12.0);

    let submit = app.page().submit;
    if marquee_button(app, ui, submit, now) {
        app.submit(now);
    }

    let seq = app.sequencer();
    if seq.banner_visible() {
        let alpha = seq.banner_opacity(now);
        let text = app.localizer().translate(keys::SUCCESS);
        ui.label(RichText::new(text).color(ACCENT.gamma_multiply(alpha)));
    } else if seq.needs_retry() {
        let text = app.localizer().translate(keys::RETRY);
        ui.label(RichText::new(text).color(ERROR));
    }
}

fn hint(app: &ContactApp, key: FieldKey) -> RichText {
    let text = RichText::new(app.form().placeholder(key));
    if app.form().has_error(key) {
        text.color(ERROR)
    } else {
        text
    }
}

fn text_field(app: &mut ContactApp, ui: &mut Ui, key: FieldKey) {
    let mut value = app.form().value(key).to_string();
    let edit = TextEdit::singleline(&mut value)
        .hint_text(hint(app, key))
        .font(FontId::proportional(FIELD_PX))
        .desired_width(f32::INFINITY);
    if ui.add(edit).changed() {
        app.input(key, value);
    }
}

fn message_field(app: &mut ContactApp, ui: &mut Ui) {
    let key = FieldKey::Message;
    let mut value = app.form().value(key).to_string();
    let height = parse_length(&app.form().draft().message_height)
        .map(Length::px)
        .unwrap_or(0.0);
    let width = ui.available_width();

    let edit = TextEdit::multiline(&mut value)
        .hint_text(hint(app, key))
        .font(FontId::proportional(FIELD_PX))
        .desired_rows(1)
        .min_size(Vec2::new(width, height));
    if ui.add(edit).changed() {
        let text_height = ui
            .fonts(|f| f.layout(value.clone(), FontId::proportional(FIELD_PX), Color32::WHITE, width))
            .size()
            .y;
        app.input(key, value);
        let mut surface = MessageBox {
            content_height: text_height + TEXTAREA_PADDING,
        };
        app.grow_message(&mut surface);
    }
}

/// Paint the label's top/bottom borders from its inline style. Unset borders
/// draw as the default separator, `0` hides them.
fn paint_label_borders(app: &ContactApp, ui: &Ui, label: ElementId, rect: Rect) {
    let default = Stroke::new(1.0, ui.visuals().widgets.inactive.bg_stroke.color);
    let highlight = Stroke::new(1.0, ACCENT);
    let tree = &app.page().tree;
    let painter = ui.painter();

    for (prop, y) in [("border-top", rect.top()), ("border-bottom", rect.bottom())] {
        let stroke = match tree.property(label, prop) {
            None => default,
            Some("0") => continue,
            Some(_) => highlight,
        };
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
    }
}

fn privacy_row(app: &mut ContactApp, ui: &mut Ui) {
    let mut checked = app.form().is_checked();
    let text = app.localizer().translate(keys::PRIVACY_TEXT).to_string();
    if ui.checkbox(&mut checked, text).changed() {
        app.set_privacy(checked);
    }
    if app.form().agreement_warning() {
        let warning = app.localizer().translate(keys::PRIVACY_ERROR);
        ui.painter().text(
            ui.cursor().min,
            Align2::LEFT_TOP,
            warning,
            FontId::proportional(12.0),
            ERROR,
        );
        ui.add_space(16.0);
    }
}

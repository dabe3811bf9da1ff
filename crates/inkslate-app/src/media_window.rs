//! Detached player window for one media session.

use eframe::egui::{self, Color32, RichText, Sense, ViewportBuilder, ViewportId};
use inkslate_core::{MediaKind, MediaPlayer, MediaSession, format_time};

/// Show the window for `session` as an immediate viewport.
///
/// Returns true once the user has closed it.
pub fn show<P: MediaPlayer>(ctx: &egui::Context, session: &mut MediaSession<P>) -> bool {
    let (width, height) = session.kind().window_size();
    let builder = ViewportBuilder::default()
        .with_title(session.window_title())
        .with_inner_size([width, height]);

    ctx.show_viewport_immediate(ViewportId::from_hash_of(session.id()), builder, |ctx, _class| {
        egui::TopBottomPanel::bottom("transport").show(ctx, |ui| transport(ui, session));
        egui::CentralPanel::default().show(ctx, |ui| display(ui, session));
        ctx.input(|i| i.viewport().close_requested())
    })
}

/// Display surface for video, title label for audio.
fn display<P: MediaPlayer>(ui: &mut egui::Ui, session: &MediaSession<P>) {
    match session.kind() {
        MediaKind::Audio => {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(session.window_title()).size(16.0));
            });
        }
        MediaKind::Video => {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
            painter.rect_filled(response.rect, 0.0, Color32::BLACK);
            painter.text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                session.title(),
                egui::FontId::proportional(16.0),
                Color32::from_gray(200),
            );
        }
    }
}

fn transport<P: MediaPlayer>(ui: &mut egui::Ui, session: &mut MediaSession<P>) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let play_label = if session.is_playing() { "Pause" } else { "Play" };
        if ui.button(play_label).clicked() {
            if session.is_playing() {
                session.pause();
            } else {
                session.play();
            }
        }
        if ui.button("Stop").clicked() {
            session.stop();
        }
        let mute_label = if session.is_muted() { "Unmute" } else { "Mute" };
        if ui.button(mute_label).clicked() {
            session.toggle_mute();
        }

        let mut volume = session.volume();
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false).text("Volume"))
            .changed()
        {
            session.set_volume(volume);
        }
    });

    ui.horizontal(|ui| {
        let seek = *session.seek_bar();
        ui.label(format_time(seek.value));
        let mut value = seek.value;
        let max = seek.max.max(0.0);
        ui.spacing_mut().slider_width = (ui.available_width() - 60.0).max(60.0);
        let response = ui.add(egui::Slider::new(&mut value, 0.0..=max).show_value(false));
        if response.drag_started() {
            session.begin_scrub();
        }
        if response.changed() {
            if session.seek_bar().is_scrubbing() {
                session.scrub(value);
            } else {
                // A click on the track without dragging.
                session.begin_scrub();
                session.scrub(value);
                session.end_scrub();
            }
        }
        if response.drag_stopped() {
            session.end_scrub();
        }
        ui.label(format_time(seek.max));
    });
    ui.add_space(4.0);
}

use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use super::envelope::fetch_envelope;
use super::types::{ScopeView, AMP_SCALE, CHANNEL_COLORS, MOVEPIN_SIZE};
use crate::capture::RecordingManager;

const BG_COLOR: Color32 = Color32::from_rgb(16, 16, 18);

/// Pentagon pin glyph: a square with a triangular tip, rotated by
/// `angle` (screen coords, clockwise) around `center`.
fn pin_points(center: Pos2, size: f32, angle: f32) -> Vec<Pos2> {
    let h = size * 0.5;
    let local = [
        (-size * 0.75, 0.0), // tip
        (-h * 0.5, -h),
        (h, -h),
        (h, h),
        (-h * 0.5, h),
    ];
    let (sin, cos) = angle.sin_cos();
    local
        .iter()
        .map(|&(x, y)| Pos2::new(center.x + x * cos - y * sin, center.y + x * sin + y * cos))
        .collect()
}

/// Repaint is a pure read of current state: fresh envelope data per
/// frame, derived threshold position, no caching.
impl ScopeView {
    pub fn draw(&self, painter: &Painter, rect: Rect, manager: &RecordingManager, now: f64) {
        painter.rect_filled(rect, 0.0, BG_COLOR);

        let scale_w = self.scale_width();
        let screen_w = self.screen_width();
        let samples = self.sample_count(screen_w, scale_w).max(0.0) as usize;
        let xoff = MOVEPIN_SIZE * 1.48;

        // back to front, so channel 0 ends up on top
        for i in (0..self.views.len()).rev() {
            if !manager.channel_is_live(i) {
                continue;
            }
            let view = &self.views[i];
            let color = CHANNEL_COLORS[i % CHANNEL_COLORS.len()];
            let yoff = view.pos * self.height;
            self.draw_data(painter, rect, manager, i, samples, xoff, yoff, screen_w, color);
            painter.add(Shape::convex_polygon(
                pin_points(
                    Pos2::new(rect.left() + MOVEPIN_SIZE, rect.top() + yoff),
                    MOVEPIN_SIZE,
                    std::f32::consts::PI, // tip toward the trace
                ),
                color,
                Stroke::NONE,
            ));
        }

        if self.thresh_mode {
            self.draw_threshold(painter, rect, screen_w, now);
        }
        self.draw_scale(painter, rect);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_data(
        &self,
        painter: &Painter,
        rect: Rect,
        manager: &RecordingManager,
        channel: usize,
        samples: usize,
        x: f32,
        y: f32,
        width: f32,
        color: Color32,
    ) {
        let data = fetch_envelope(manager, channel, self.channel_offset, samples, width);
        if data.len() < 2 {
            return;
        }
        let gain = self.views[channel].gain;
        let dist = width / (data.len() - 1) as f32;
        let scale = self.height * AMP_SCALE;
        let mut points = Vec::with_capacity(data.len() * 2);
        for (j, &(mn, mx)) in data.iter().enumerate() {
            let px = rect.left() + (j as f32 * dist + x).floor();
            points.push(Pos2::new(px, rect.top() + (-(mn as f32) * gain * scale + y)));
            points.push(Pos2::new(px, rect.top() + (-(mx as f32) * gain * scale + y)));
        }
        painter.add(Shape::line(points, Stroke::new(1.0, color)));
    }

    fn draw_threshold(&self, painter: &Painter, rect: Rect, screen_w: f32, now: f64) {
        let color = CHANNEL_COLORS[self.selected_channel % CHANNEL_COLORS.len()];
        let thr = self.threshold_pos();

        if thr > MOVEPIN_SIZE / 2.0 {
            painter.add(Shape::convex_polygon(
                pin_points(
                    Pos2::new(rect.left() + self.width - MOVEPIN_SIZE, rect.top() + thr),
                    MOVEPIN_SIZE,
                    0.0, // tip toward the trace
                ),
                color,
                Stroke::NONE,
            ));

            // dash phase scrolls with wall-clock time
            let dotw = 20.0f32;
            let movement = ((now * 1000.0 / 20.0) as i64 % dotw as i64) as f32;
            let left = MOVEPIN_SIZE * 1.5;
            let right = left + screen_w;
            let y = rect.top() + thr;
            let n = (screen_w / dotw) as i32 + 1;
            for i in 0..=n {
                let x = left + dotw * i as f32 - movement;
                let x0 = rect.left() + x.clamp(left, right);
                let x1 = rect.left() + (x + dotw * 0.7).clamp(left, right);
                painter.line_segment(
                    [Pos2::new(x0, y), Pos2::new(x1, y)],
                    Stroke::new(1.0, color),
                );
            }
            self.draw_scale(painter, rect);
        } else {
            // threshold sits above the visible range
            painter.add(Shape::convex_polygon(
                pin_points(
                    Pos2::new(
                        rect.left() + self.width - MOVEPIN_SIZE,
                        rect.top() + MOVEPIN_SIZE * 0.5,
                    ),
                    MOVEPIN_SIZE,
                    std::f32::consts::FRAC_PI_2, // tip up
                ),
                color,
                Stroke::NONE,
            ));
        }
    }

    fn draw_scale(&self, painter: &Painter, rect: Rect) {
        let (shown_w, label) = scale_legend(self.time_scale, self.scale_width());
        let bar = Rect::from_min_size(
            Pos2::new(
                rect.left() + self.width - shown_w - 20.0,
                rect.top() + self.height * 0.9,
            ),
            egui::vec2(shown_w, 1.0),
        );
        painter.rect_filled(bar, 0.0, Color32::WHITE);
        painter.text(
            Pos2::new(
                rect.left() + self.width - shown_w / 2.0 - 20.0,
                rect.top() + self.height * 0.9 + 15.0,
            ),
            egui::Align2::CENTER_CENTER,
            label,
            FontId::monospace(12.0),
            Color32::WHITE,
        );
    }
}

/// Ruler bar width and unit label for the current timebase. The unit
/// exponent truncates toward zero, so timebases above one second per
/// division stay in whole seconds.
fn scale_legend(time_scale: f32, scale_width: f32) -> (f32, String) {
    let unit = (-time_scale.log10()) as i32;
    let shown_w = scale_width / 10f32.powi(unit);
    let value = 10f32.powi(-(unit % 3));
    let suffix = match unit / 3 {
        1 => "ms",
        2 => "\u{b5}s",
        3 => "ns",
        _ => "s",
    };
    (shown_w, format!("{} {}", value, suffix))
}

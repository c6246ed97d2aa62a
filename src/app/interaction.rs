use super::types::{DragTarget, ScopeView, GAIN_MAX, GAIN_MIN, MOVEPIN_SIZE, POS_MAX, POS_MIN};

/// Pointer/wheel dispatch. Coordinates are local pixels within the
/// scope canvas. The drag state is one `DragTarget`, so at most one of
/// slider/gain/threshold can be held at a time.
impl ScopeView {
    /// Circular hit test against the position pins in the left column.
    /// Returns the channel and the pointer's y distance to the pin
    /// center.
    fn slider_hover(&self, x: f32, y: f32) -> Option<(usize, f32)> {
        let dx = MOVEPIN_SIZE - x;
        let xx = dx * dx;
        for (i, view) in self.views.iter().enumerate() {
            let dy = y - self.height * view.pos;
            if xx + dy * dy < MOVEPIN_SIZE * MOVEPIN_SIZE * 0.25 {
                return Some((i, dy));
            }
        }
        None
    }

    /// Circular hit test against the threshold pin in the right column.
    fn thresh_hover(&self, x: f32, y: f32) -> Option<f32> {
        let dx = self.width - MOVEPIN_SIZE - x;
        let dy = y - (MOVEPIN_SIZE / 2.0).max(self.threshold_pos());
        if dx * dx + dy * dy < MOVEPIN_SIZE * MOVEPIN_SIZE * 0.25 {
            Some(dy)
        } else {
            None
        }
    }

    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        if self.drag != DragTarget::None {
            return;
        }

        if x <= MOVEPIN_SIZE * 1.5 {
            if let Some((i, dy)) = self.slider_hover(x, y) {
                self.drag = DragTarget::Slider(i);
                self.drag_pixel_offset = dy;
                self.selected_channel = i;
            }
        } else if !self.thresh_mode || x <= self.width - MOVEPIN_SIZE * 1.5 {
            // in threshold mode the right column belongs to the
            // threshold pin, not the gain band
            for (i, view) in self.views.iter().enumerate() {
                let dy = (self.height * view.pos - y).abs();
                if dy < 40.0 + 20.0 * view.gain {
                    self.drag = DragTarget::Gain(i);
                    self.drag_pixel_offset = dy;
                    self.gain_at_press = view.gain;
                    break;
                }
            }
        }

        if self.thresh_mode {
            if let Some(dy) = self.thresh_hover(x, y) {
                debug_assert!(
                    self.drag == DragTarget::None,
                    "threshold pin overlaps another drag target"
                );
                if self.drag == DragTarget::None {
                    self.drag = DragTarget::Threshold;
                    self.drag_pixel_offset = dy;
                }
            }
        }
    }

    pub fn pointer_moved(&mut self, y: f32) {
        match self.drag {
            DragTarget::Slider(i) => {
                if let Some(view) = self.views.get_mut(i) {
                    view.pos = ((y + self.drag_pixel_offset) / self.height).clamp(POS_MIN, POS_MAX);
                }
            }
            DragTarget::Threshold => {
                let t = ((y - self.drag_pixel_offset) / self.height).max(MOVEPIN_SIZE / self.height);
                if let Some(view) = self.views.get_mut(self.selected_channel) {
                    let t = t.min(view.pos);
                    view.thresh = (view.pos - t) / view.gain;
                }
            }
            DragTarget::Gain(i) => {
                if let Some(view) = self.views.get_mut(i) {
                    let new_gain = self.gain_at_press
                        * ((self.height * view.pos - y) / self.drag_pixel_offset).abs();
                    if new_gain.is_finite() {
                        view.gain = new_gain.clamp(GAIN_MIN, GAIN_MAX);
                    } else {
                        view.gain = GAIN_MAX;
                    }
                }
            }
            DragTarget::None => {}
        }
    }

    pub fn pointer_released(&mut self) {
        self.drag = DragTarget::None;
        self.drag_pixel_offset = 0.0;
        self.gain_at_press = 1.0;
    }

    /// Wheel is stateless: over the pin column it scales that pin's
    /// gain, elsewhere it zooms the timebase, except over the threshold
    /// column while threshold mode is on.
    pub fn wheel(&mut self, x: f32, y: f32, up: bool) {
        if x < MOVEPIN_SIZE * 1.5 {
            if let Some((i, _)) = self.slider_hover(x, y) {
                let view = &mut self.views[i];
                view.gain = if up {
                    (view.gain * 1.2).min(GAIN_MAX)
                } else {
                    (view.gain * 0.8).max(GAIN_MIN)
                };
            }
        } else if !self.thresh_mode || x < self.width - MOVEPIN_SIZE * 1.5 {
            if up {
                self.zoom_in();
            } else {
                self.zoom_out();
            }
        }
    }
}

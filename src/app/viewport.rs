use super::types::{ChannelView, ScopeView, DEFAULT_TIME_SCALE, MOVEPIN_SIZE, TIME_SCALE_MAX};

/// Time/zoom/offset math. Zoom and offset are coupled: changing the
/// timebase changes how many samples fit on screen, which changes the
/// valid offset range, so every zoom step re-runs `set_offset`.
impl ScopeView {
    /// Pixels spanned by one timebase division (5% of the view width
    /// per `time_scale` seconds).
    pub fn scale_width(&self) -> f32 {
        0.05 * self.width / self.time_scale
    }

    /// Drawable wave width: full width minus the pin column, and minus
    /// the threshold column when threshold mode is on.
    pub fn screen_width(&self) -> f32 {
        let mut w = self.width - MOVEPIN_SIZE * 1.5;
        if self.thresh_mode {
            w -= MOVEPIN_SIZE * 1.5;
        }
        w
    }

    /// Raw samples spanned by `screen_w` pixels at the current zoom.
    pub fn sample_count(&self, screen_w: f32, scale_w: f32) -> f32 {
        screen_w * self.sample_rate as f32 / scale_w
    }

    fn visible_samples(&self) -> i64 {
        self.sample_count(self.screen_width(), self.scale_width()) as i64
    }

    /// Clamp and store a requested offset, then publish the normalized
    /// scroll position in [0, 1000]. Returns the published value.
    pub fn set_offset(&mut self, offset: i64) -> f32 {
        let samples = self.visible_samples();
        // once the visible window outgrows the buffer the only valid
        // offset is zero
        let floor = (-self.capacity + samples).min(0);

        self.channel_offset = offset.min(0);
        if self.channel_offset < floor {
            // that's all that fits on the screen
            self.channel_offset = floor;
        }

        let range = self.capacity - samples;
        self.rel_offset = if range > 0 {
            1000.0 * self.channel_offset as f32 / range as f32 + 1000.0
        } else {
            1000.0
        };
        self.rel_offset
    }

    /// Inverse of `set_offset`'s normalization; called by the scrollbar
    /// itself, so nothing is republished.
    pub fn set_rel_offset(&mut self, rel: f32) {
        let f = rel * 0.001 - 1.0;
        let count = (self.capacity - self.visible_samples()).max(0);
        self.channel_offset = (f * count as f32) as i64;
    }

    pub fn zoom_in(&mut self) {
        self.time_scale = (self.time_scale * 0.8).max(1.0 / self.sample_rate as f32);
        self.set_offset(self.channel_offset);
    }

    pub fn zoom_out(&mut self) {
        self.time_scale = (self.time_scale * 1.2).min(TIME_SCALE_MAX);
        // or else the buffer end would scroll into view
        self.set_offset(self.channel_offset);
    }

    pub fn reset_zoom(&mut self) {
        self.time_scale = DEFAULT_TIME_SCALE;
        self.set_offset(self.channel_offset);
    }

    /// Resize the channel list to the live channel count. New entries
    /// get staggered defaults; shrinking truncates and re-clamps the
    /// selection.
    pub fn update_channels(&mut self, n: usize) {
        if n < self.views.len() {
            self.views.truncate(n);
        } else {
            let old = self.views.len();
            for i in old..n {
                self.views.push(ChannelView::new(i));
            }
        }
        if self.selected_channel >= n {
            self.selected_channel = n.saturating_sub(1);
        }
    }

    pub fn toggle_thresh_mode(&mut self) {
        self.thresh_mode = !self.thresh_mode;
    }

    pub fn set_selected_channel(&mut self, channel: usize) {
        if channel < self.views.len() {
            self.selected_channel = channel;
        }
    }

    /// Screen y of the selected channel's threshold line, derived fresh
    /// from the stored normalized values.
    pub fn threshold_pos(&self) -> f32 {
        let Some(view) = self.views.get(self.selected_channel) else {
            return 0.0;
        };
        self.height * (view.pos - view.thresh * view.gain)
    }
}

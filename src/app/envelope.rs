use crate::capture::RecordingManager;

/// Envelope query parameters for the visible window: where it starts in
/// the buffer, how many raw samples it spans, and the per-pixel
/// compression factor (1 = no compression).
pub fn envelope_window(
    play_pos: i64,
    channel_offset: i64,
    samples: usize,
    screen_width: f32,
) -> (i64, usize, usize) {
    let start = play_pos + channel_offset - samples as i64;
    let skip = if samples as f32 > screen_width {
        (samples as f32 / screen_width) as usize
    } else {
        1
    };
    (start, samples, skip.max(1))
}

/// Fetch min/max pairs for one channel's visible window.
pub fn fetch_envelope(
    manager: &RecordingManager,
    channel: usize,
    channel_offset: i64,
    samples: usize,
    screen_width: f32,
) -> Vec<(i16, i16)> {
    let (start, len, skip) = envelope_window(manager.pos(), channel_offset, samples, screen_width);
    manager.channel_samples_envelope(channel, start, len, skip)
}

use egui::Color32;

/// Side length of the draggable pin markers, in pixels.
pub const MOVEPIN_SIZE: f32 = 30.0;
/// Raw sample units -> fraction of view height.
pub const AMP_SCALE: f32 = 0.001;

pub const GAIN_MIN: f32 = 0.001;
pub const GAIN_MAX: f32 = 10.0;
pub const POS_MIN: f32 = 0.05;
pub const POS_MAX: f32 = 0.95;
pub const TIME_SCALE_MAX: f32 = 2.0;
pub const DEFAULT_TIME_SCALE: f32 = 0.1;

pub const CHANNEL_COLORS: [Color32; 3] = [
    Color32::from_rgb(225, 252, 90),
    Color32::from_rgb(255, 138, 91),
    Color32::from_rgb(106, 106, 233),
];

/// Per-channel visual state. `thresh` is an offset from `pos` in
/// gain-scaled amplitude units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelView {
    pub gain: f32,
    pub pos: f32,
    pub thresh: f32,
}

impl ChannelView {
    pub fn new(index: usize) -> Self {
        Self {
            gain: 1.0,
            pos: 0.4 + 0.1 * index as f32,
            thresh: 0.1,
        }
    }
}

/// What the primary button currently holds. A single tagged value, so
/// slider/gain/threshold drags are mutually exclusive by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    Slider(usize),
    Gain(usize),
    Threshold,
}

/// The scope's whole view/interaction state: channel list, viewport
/// (offset/zoom), threshold mode and the transient drag state. All
/// mutation funnels through the viewport and interaction methods.
pub struct ScopeView {
    pub views: Vec<ChannelView>,
    pub channel_offset: i64,
    pub time_scale: f32,
    pub thresh_mode: bool,
    pub selected_channel: usize,
    pub drag: DragTarget,
    pub(crate) drag_pixel_offset: f32,
    pub(crate) gain_at_press: f32,
    pub(crate) rel_offset: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) sample_rate: u32,
    pub(crate) capacity: i64,
}

impl ScopeView {
    pub fn new(sample_rate: u32, capacity: usize) -> Self {
        Self {
            views: Vec::new(),
            channel_offset: 0,
            time_scale: DEFAULT_TIME_SCALE,
            thresh_mode: false,
            selected_channel: 0,
            drag: DragTarget::None,
            drag_pixel_offset: 0.0,
            gain_at_press: 1.0,
            rel_offset: 1000.0,
            width: 0.0,
            height: 0.0,
            sample_rate: sample_rate.max(1),
            capacity: capacity.max(1) as i64,
        }
    }

    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Last published normalized scroll position, in [0, 1000].
    pub fn rel_offset(&self) -> f32 {
        self.rel_offset
    }
}

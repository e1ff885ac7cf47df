pub mod camera;
pub mod dice;
pub mod play;
pub mod session;
pub mod state;

pub mod prelude {
    use std::time::Duration;

    use bevy::{color::Color, math::Vec2};

    pub const BG_COLOR: Color = Color::srgb(0.12, 0.12, 0.14);

    // timings
    pub const COLOR_INTERVAL: Duration = Duration::from_secs(5);
    pub const SPAWN_INTERVAL: Duration = Duration::from_secs(1);
    pub const BONUS_INTERVAL: Duration = Duration::from_secs(7);
    pub const BONUS_VISIBLE: Duration = Duration::from_millis(1500);
    pub const FEEDBACK_DURATION: Duration = Duration::from_millis(500);
    /// scale a clicked slot reaches at the end of its feedback
    pub const FEEDBACK_SCALE: f32 = 1.5;

    // scoring
    pub const BOX_COUNT: usize = 10;
    pub const MIN_POINTS: u8 = 1;
    pub const MAX_POINTS: u8 = 3;
    pub const BONUS_POINTS: u8 = 5;

    // palette
    pub const RED: Color = Color::srgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::srgb(0.0, 0.5, 0.0);
    pub const YELLOW: Color = Color::srgb(1.0, 1.0, 0.0);
    pub const PINK: Color = Color::srgb(1.0, 0.75, 0.8);
    pub const BLUE: Color = Color::srgb(0.0, 0.0, 1.0);
    pub const GOLD: Color = Color::srgb(1.0, 0.84, 0.0);
    pub const AFFIRM_COLOR: Color = Color::srgb(0.56, 0.93, 0.56);
    pub const DENY_COLOR: Color = Color::srgb(0.98, 0.5, 0.45);

    // layout
    pub const WINDOW_SIZE: Vec2 = Vec2::new(720.0, 480.0);
    pub const STRIP_SIZE: Vec2 = Vec2::new(480.0, 40.0);
    pub const SLOT_SIZE_PX: f32 = 48.0;
    pub const SLOT_GAP_PX: f32 = 14.0;
    pub const LABEL_FONT_SIZE: f32 = 24.0;
    pub const START_BUTTON_COLOR: Color = Color::srgb(0.85, 0.85, 0.85);
}

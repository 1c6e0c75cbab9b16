use crate::i18n::Language;

const VOLUME_STEPS: u8 = 5;

/// Effect volume in 20% steps. Never silent, never above 100%.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(VOLUME_STEPS);

    /// Next step in the cycle 20, 40, 60, 80, 100, 20, ...
    pub fn next(self) -> Volume {
        if self.0 >= VOLUME_STEPS {
            Volume(1)
        } else {
            Volume(self.0 + 1)
        }
    }

    pub fn fraction(self) -> f32 {
        self.0 as f32 / VOLUME_STEPS as f32
    }

    pub fn percent(self) -> u32 {
        self.0 as u32 * 100 / VOLUME_STEPS as u32
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume::MAX
    }
}

/// Session-wide settings changed from the options screen. Never saved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub volume: Volume,
    pub fullscreen: bool,
    pub language: Language,
}

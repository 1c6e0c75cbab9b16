//! Best-effort asset loading.
//!
//! Every load is a `Result`; callers fall back to silence (sounds) or to a
//! generated placeholder (flag icons) and log a warning. A missing file never
//! stops the game from starting.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbImage;
use rand::Rng;
use rodio::Decoder;

use crate::audio::Sfx;
use crate::config::{
    FLAG_ENGLISH, FLAG_ICON_SIZE, FLAG_SPANISH, MUSIC_BACKGROUND, SOUND_MENU, SOUND_PADDLE,
    SOUND_SCORE, SOUND_WALL,
};
use crate::i18n::Language;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode audio {}: {source}", path.display())]
    Audio {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    #[error("cannot decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("cannot start playback: {0}")]
    Playback(#[from] rodio::PlayError),
}

/// An encoded sound kept in memory so it can be decoded again per playback.
#[derive(Clone, Debug)]
pub struct SoundClip {
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl SoundClip {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes: Arc<[u8]> = fs::read(path)
            .map_err(|source| AssetError::Read { path: path.to_path_buf(), source })?
            .into();
        let clip = Self { path: path.to_path_buf(), bytes };
        // Reject files rodio can't play now rather than on first use.
        clip.decoder()?;
        Ok(clip)
    }

    pub fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, AssetError> {
        Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
            .map_err(|source| AssetError::Audio { path: self.path.clone(), source })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Clone, Debug, Default)]
pub struct Sounds {
    pub paddle: Option<SoundClip>,
    pub wall: Option<SoundClip>,
    pub score: Option<SoundClip>,
    pub menu: Option<SoundClip>,
    pub music: Option<SoundClip>,
}

impl Sounds {
    pub fn load(dir: &Path) -> Self {
        Self {
            paddle: load_sound(&dir.join(SOUND_PADDLE)),
            wall: load_sound(&dir.join(SOUND_WALL)),
            score: load_sound(&dir.join(SOUND_SCORE)),
            menu: load_sound(&dir.join(SOUND_MENU)),
            music: load_sound(&dir.join(MUSIC_BACKGROUND)),
        }
    }

    pub fn effect(&self, sfx: Sfx) -> Option<&SoundClip> {
        match sfx {
            Sfx::Paddle => self.paddle.as_ref(),
            Sfx::Wall => self.wall.as_ref(),
            Sfx::Score => self.score.as_ref(),
            Sfx::Menu => self.menu.as_ref(),
        }
    }
}

fn load_sound(path: &Path) -> Option<SoundClip> {
    match SoundClip::load(path) {
        Ok(clip) => {
            tracing::debug!(path = %path.display(), "loaded sound");
            Some(clip)
        }
        Err(err) => {
            tracing::warn!(%err, "sound disabled");
            None
        }
    }
}

/// Language icon: either the decoded flag or a generated stand-in.
#[derive(Clone, Debug)]
pub enum FlagIcon {
    Image(RgbImage),
    Placeholder { color: [u8; 3], caption: &'static str },
}

impl FlagIcon {
    /// Decode and scale to the icon size.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path)
            .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?;
        let scaled = img.resize_exact(FLAG_ICON_SIZE, FLAG_ICON_SIZE, FilterType::Triangle);
        Ok(FlagIcon::Image(scaled.to_rgb8()))
    }

    /// Random solid color captioned with the language code.
    pub fn placeholder<R: Rng + ?Sized>(lang: Language, rng: &mut R) -> Self {
        FlagIcon::Placeholder {
            color: rng.gen(),
            caption: lang.code(),
        }
    }

    pub fn load_or_placeholder<R: Rng + ?Sized>(path: &Path, lang: Language, rng: &mut R) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, "using placeholder flag");
            Self::placeholder(lang, rng)
        })
    }

    /// Color at normalized coordinates `u`, `v` in `[0, 1)`.
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        match self {
            FlagIcon::Image(img) => {
                let x = ((u * img.width() as f32) as u32).min(img.width().saturating_sub(1));
                let y = ((v * img.height() as f32) as u32).min(img.height().saturating_sub(1));
                img.get_pixel(x, y).0
            }
            FlagIcon::Placeholder { color, .. } => *color,
        }
    }

    pub fn caption(&self) -> Option<&'static str> {
        match self {
            FlagIcon::Image(_) => None,
            FlagIcon::Placeholder { caption, .. } => Some(*caption),
        }
    }
}

/// Everything read from disk at startup.
#[derive(Clone, Debug)]
pub struct Assets {
    pub sounds: Sounds,
    /// Indexed by `Language::index`.
    pub flags: [FlagIcon; 2],
}

impl Assets {
    pub fn load<R: Rng + ?Sized>(dir: &Path, rng: &mut R) -> Self {
        let flags = [
            FlagIcon::load_or_placeholder(&dir.join(FLAG_ENGLISH), Language::English, rng),
            FlagIcon::load_or_placeholder(&dir.join(FLAG_SPANISH), Language::Spanish, rng),
        ];
        Self { sounds: Sounds::load(dir), flags }
    }
}

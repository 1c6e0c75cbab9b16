use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::{AssetError, SoundClip, Sounds};
use crate::config::MUSIC_VOLUME_RATIO;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    Paddle,
    Wall,
    Score,
    Menu,
}

/// Fire-and-forget sound output.
pub trait Audio {
    fn play(&mut self, sfx: Sfx);
    /// Effect volume in `[0, 1]`. Music follows at `MUSIC_VOLUME_RATIO` of it.
    fn set_volume(&mut self, volume: f32);
}

/// Used when there is no output device.
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _sfx: Sfx) {}
    fn set_volume(&mut self, _volume: f32) {}
}

pub struct RodioAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: Sounds,
    music: Option<Sink>,
    volume: f32,
}

impl RodioAudio {
    pub fn new(sounds: Sounds, volume: f32) -> Result<Self, AssetError> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = sounds.music.as_ref().and_then(|clip| {
            start_music(&handle, clip, volume)
                .map_err(|err| tracing::warn!(%err, "background music disabled"))
                .ok()
        });
        Ok(Self {
            _stream: stream,
            handle,
            sounds,
            music,
            volume,
        })
    }

    fn play_clip(&self, clip: &SoundClip) -> Result<(), AssetError> {
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volume);
        sink.append(clip.decoder()?);
        sink.detach();
        Ok(())
    }
}

/// Music sits under the effects at a fixed ratio.
fn music_volume(effect_volume: f32) -> f32 {
    effect_volume * MUSIC_VOLUME_RATIO
}

fn start_music(
    handle: &OutputStreamHandle,
    clip: &SoundClip,
    volume: f32,
) -> Result<Sink, AssetError> {
    let sink = Sink::try_new(handle)?;
    sink.set_volume(music_volume(volume));
    sink.append(clip.decoder()?.repeat_infinite());
    tracing::debug!(path = %clip.path().display(), "background music started");
    Ok(sink)
}

impl Audio for RodioAudio {
    fn play(&mut self, sfx: Sfx) {
        let Some(clip) = self.sounds.effect(sfx) else { return };
        if let Err(err) = self.play_clip(clip) {
            tracing::debug!(%err, ?sfx, "effect dropped");
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(music) = &self.music {
            music.set_volume(music_volume(volume));
        }
    }
}

/// Open the default output device, or fall back to silence.
pub fn open(sounds: Sounds, volume: f32) -> Box<dyn Audio> {
    match RodioAudio::new(sounds, volume) {
        Ok(audio) => Box::new(audio),
        Err(err) => {
            tracing::warn!(%err, "audio disabled");
            Box::new(Silent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Volume;

    #[test]
    fn test_music_plays_at_half_the_effect_volume() {
        assert_eq!(music_volume(1.0), 0.5);
        assert_eq!(music_volume(0.0), 0.0);

        let mut volume = Volume::default();
        for _ in 0..5 {
            volume = volume.next();
            let effects = volume.fraction();
            assert!((music_volume(effects) - effects / 2.0).abs() < 1e-6);
        }
    }
}

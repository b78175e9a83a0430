//! Sound cues for game events
//!
//! Both cues are decoded once at startup and kept in memory as raw samples;
//! each play hands a copy to a detached rodio sink. A missing cue file falls
//! back to a short synthesized tone. A cue file that exists but cannot be
//! decoded is an error.

use anyhow::{Context, Result};
use rodio::{buffer::SamplesBuffer, Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::f32::consts::TAU;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

use crate::game::{GameConfig, TickOutcome};

const SAMPLE_RATE: u32 = 44_100;

/// A game event that has a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// The round reset after a collision
    Hit,
    /// The snake ate food
    Food,
}

impl SoundCue {
    /// The cue a tick outcome should play, if any
    pub fn for_outcome(outcome: TickOutcome) -> Option<SoundCue> {
        match outcome {
            TickOutcome::Reset(_) => Some(SoundCue::Hit),
            TickOutcome::AteFood => Some(SoundCue::Food),
            TickOutcome::Idle | TickOutcome::Moved => None,
        }
    }
}

/// Decoded audio ready to be replayed
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl Clip {
    /// Decode an audio file (mp3, wav, ogg or flac)
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open sound {:?}", path))?;
        let decoder = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode sound {:?}", path))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples().collect();

        Ok(Self {
            channels,
            sample_rate,
            samples,
        })
    }

    /// Load `path`, or synthesize `fallback` when the file does not exist
    pub fn load_or_synthesize(path: &Path, fallback: SoundCue) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        warn!(?path, cue = ?fallback, "sound file missing, using synthesized tone");
        Ok(Self::synthesize(fallback))
    }

    /// A short decaying tone: a low buzz for hits, a high blip for food
    pub fn synthesize(cue: SoundCue) -> Self {
        let (frequency, duration) = match cue {
            SoundCue::Hit => (110.0, 0.3),
            SoundCue::Food => (880.0, 0.08),
        };

        let sample_count = (SAMPLE_RATE as f32 * duration) as usize;
        let samples = (0..sample_count)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let envelope = 1.0 - t / duration;
                0.2 * envelope * (TAU * frequency * t).sin()
            })
            .collect();

        Self {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            samples,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / (self.channels as f32 * self.sample_rate as f32)
    }
}

/// Audio output plus the two loaded cues
pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    hit: Clip,
    food: Clip,
}

impl Audio {
    /// Open the default output device and load both cues from the configured
    /// sounds directory.
    ///
    /// Returns `Ok(None)` when there is no usable output device; the game then
    /// runs silent.
    pub fn open(config: &GameConfig) -> Result<Option<Self>> {
        let hit = Clip::load_or_synthesize(&config.hit_sound_path(), SoundCue::Hit)?;
        let food = Clip::load_or_synthesize(&config.food_sound_path(), SoundCue::Food)?;

        let (stream, handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                warn!(%err, "no audio output device, running silent");
                return Ok(None);
            }
        };
        info!("audio output opened");

        Ok(Some(Self {
            _stream: stream,
            handle,
            hit,
            food,
        }))
    }

    pub fn play(&self, cue: SoundCue) {
        let clip = match cue {
            SoundCue::Hit => &self.hit,
            SoundCue::Food => &self.food,
        };

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                let source = SamplesBuffer::new(clip.channels, clip.sample_rate, clip.samples.clone());
                sink.append(source);
                sink.detach();
            }
            Err(err) => warn!(%err, ?cue, "failed to play sound"),
        }
    }
}

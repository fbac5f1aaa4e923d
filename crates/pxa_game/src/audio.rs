//! Best-effort sound playback.
//!
//! The simulation talks to audio only through [`AudioOut`], whose methods
//! cannot fail: a missing clip, a dead device or a contended mixer is logged
//! at debug level and otherwise ignored. The frame never waits on audio.
//!
//! The device backend (cargo feature `audio`) decodes 16-bit PCM WAV clips up
//! front and mixes them on the cpal callback thread through a shared
//! [`Mixer`].

use std::sync::Arc;

pub trait AudioOut {
    /// Fire a one-shot effect.
    fn play_sound(&mut self, name: &str);
    /// Start `name` as looping background music, replacing any current track.
    fn play_music(&mut self, name: &str);
    fn stop_music(&mut self);
}

/// Discards every request.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioOut for SilentAudio {
    fn play_sound(&mut self, name: &str) {
        log::debug!("(silent) sound '{name}'");
    }

    fn play_music(&mut self, name: &str) {
        log::debug!("(silent) music '{name}'");
    }

    fn stop_music(&mut self) {
        log::debug!("(silent) music stopped");
    }
}

/// Decoded mono samples in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct PcmClip {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

const WAVE_FORMAT_PCM: u16 = 1;

/// Decode a RIFF/WAVE file holding 16-bit integer PCM. Multi-channel audio is
/// averaged down to mono.
pub fn decode_wav(bytes: &[u8]) -> Result<PcmClip, String> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err("WAV decode failed: missing RIFF/WAVE header".to_string());
    }

    let mut format: Option<(u16, u16, u32, u16)> = None;
    let mut data: Option<&[u8]> = None;
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let len = le_u32(bytes, pos + 4) as usize;
        let body_start = pos + 8;
        let body_end = body_start
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| {
                format!(
                    "WAV decode failed: chunk '{}' overruns file",
                    String::from_utf8_lossy(id)
                )
            })?;
        let body = &bytes[body_start..body_end];

        match id {
            b"fmt " => {
                if body.len() < 16 {
                    return Err("WAV decode failed: fmt chunk too short".to_string());
                }
                format = Some((
                    le_u16(body, 0),
                    le_u16(body, 2),
                    le_u32(body, 4),
                    le_u16(body, 14),
                ));
            }
            b"data" => data = Some(body),
            _ => {}
        }
        // Chunks are padded to even length.
        pos = body_end + (len & 1);
    }

    let (tag, channels, sample_rate, bits) =
        format.ok_or_else(|| "WAV decode failed: no fmt chunk".to_string())?;
    let data = data.ok_or_else(|| "WAV decode failed: no data chunk".to_string())?;

    if tag != WAVE_FORMAT_PCM || bits != 16 {
        return Err(format!(
            "WAV decode failed: unsupported encoding (format {tag}, {bits}-bit); expected 16-bit PCM"
        ));
    }
    if channels == 0 || sample_rate == 0 {
        return Err("WAV decode failed: zero channels or sample rate".to_string());
    }

    let channels = channels as usize;
    let frame_bytes = channels * 2;
    let samples = data
        .chunks_exact(frame_bytes)
        .map(|frame| {
            let sum: f32 = frame
                .chunks_exact(2)
                .map(|s| i16::from_le_bytes([s[0], s[1]]) as f32 / 32768.0)
                .sum();
            sum / channels as f32
        })
        .collect();

    Ok(PcmClip {
        sample_rate,
        samples,
    })
}

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[derive(Debug, Clone)]
struct Voice {
    clip: Arc<PcmClip>,
    cursor: f64,
    looping: bool,
}

impl Voice {
    fn new(clip: Arc<PcmClip>, looping: bool) -> Self {
        Self {
            clip,
            cursor: 0.0,
            looping,
        }
    }

    /// Next sample at `output_rate`, or `None` once a one-shot is exhausted.
    fn next(&mut self, output_rate: u32) -> Option<f32> {
        let len = self.clip.samples.len();
        if len == 0 {
            return None;
        }
        if self.cursor >= len as f64 {
            if !self.looping {
                return None;
            }
            self.cursor %= len as f64;
        }
        let sample = self.clip.samples[self.cursor as usize];
        self.cursor += self.clip.sample_rate as f64 / output_rate.max(1) as f64;
        Some(sample)
    }
}

/// Sums active effects and the music track into a mono stream.
#[derive(Debug)]
pub struct Mixer {
    output_rate: u32,
    effects: Vec<Voice>,
    music: Option<Voice>,
    pub volume: f32,
}

impl Mixer {
    pub fn new(output_rate: u32) -> Self {
        Self {
            output_rate,
            effects: Vec::new(),
            music: None,
            volume: 1.0,
        }
    }

    pub fn play_effect(&mut self, clip: Arc<PcmClip>) {
        self.effects.push(Voice::new(clip, false));
    }

    pub fn set_music(&mut self, clip: Arc<PcmClip>) {
        self.music = Some(Voice::new(clip, true));
    }

    pub fn stop_music(&mut self) {
        self.music = None;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }

    pub fn active_effects(&self) -> usize {
        self.effects.len()
    }

    pub fn next_sample(&mut self) -> f32 {
        let rate = self.output_rate;
        let mut acc = 0.0;
        self.effects.retain_mut(|voice| match voice.next(rate) {
            Some(s) => {
                acc += s;
                true
            }
            None => false,
        });
        if let Some(music) = self.music.as_mut() {
            acc += music.next(rate).unwrap_or(0.0);
        }
        (acc * self.volume).clamp(-1.0, 1.0)
    }

    /// Fill an interleaved buffer, writing the same sample to every channel.
    pub fn fill(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
    }
}

/// Sample rate used when the device reports no default configuration.
pub const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// Output range chosen for the device stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRange {
    pub channels: u16,
    pub min_rate: u32,
    pub max_rate: u32,
    pub is_f32: bool,
}

/// Pick an f32 output layout: stereo first, then the fewest channels, at the
/// preferred rate clamped into the range. `None` when no range is f32.
pub fn choose_output(ranges: &[OutputRange], preferred_rate: u32) -> Option<(u16, u32)> {
    ranges
        .iter()
        .filter(|r| r.is_f32 && r.channels > 0 && r.min_rate <= r.max_rate)
        .min_by_key(|r| (r.channels != 2, r.channels))
        .map(|r| (r.channels, preferred_rate.clamp(r.min_rate, r.max_rate)))
}

#[cfg(feature = "audio")]
pub use device::DeviceAudio;

#[cfg(feature = "audio")]
mod device {
    use super::{
        choose_output, decode_wav, AudioOut, Mixer, OutputRange, PcmClip, FALLBACK_SAMPLE_RATE,
    };
    use crate::assets::AssetStore;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    pub struct DeviceAudio {
        mixer: Arc<Mutex<Mixer>>,
        sounds: HashMap<String, Arc<PcmClip>>,
        music: HashMap<String, Arc<PcmClip>>,
        _stream: cpal::Stream,
    }

    impl DeviceAudio {
        /// Open the default output device and decode every clip in `store`.
        pub fn open(store: &AssetStore) -> Result<Self, String> {
            let host = cpal::default_host();
            let device = host
                .default_output_device()
                .ok_or_else(|| "No default audio output device".to_string())?;
            let preferred_rate = device
                .default_output_config()
                .map(|c| c.sample_rate().0)
                .unwrap_or(FALLBACK_SAMPLE_RATE);
            let ranges: Vec<OutputRange> = device
                .supported_output_configs()
                .map_err(|e| format!("Failed to query audio output configs: {e}"))?
                .map(|r| OutputRange {
                    channels: r.channels(),
                    min_rate: r.min_sample_rate().0,
                    max_rate: r.max_sample_rate().0,
                    is_f32: r.sample_format() == cpal::SampleFormat::F32,
                })
                .collect();
            let (channels, rate) = choose_output(&ranges, preferred_rate).unwrap_or_else(|| {
                log::debug!("No f32 output range listed; requesting stereo f32");
                (2, preferred_rate)
            });
            let config = cpal::StreamConfig {
                channels,
                sample_rate: cpal::SampleRate(rate),
                buffer_size: cpal::BufferSize::Default,
            };
            let channels = config.channels as usize;

            let mixer = Arc::new(Mutex::new(Mixer::new(config.sample_rate.0)));
            let callback_mixer = Arc::clone(&mixer);
            let stream = device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        match callback_mixer.try_lock() {
                            Ok(mut mixer) => mixer.fill(data, channels),
                            Err(_) => data.fill(0.0),
                        }
                    },
                    |err| log::warn!("Audio stream error: {err}"),
                    None,
                )
                .map_err(|e| format!("Failed to build audio stream: {e}"))?;
            stream
                .play()
                .map_err(|e| format!("Failed to start audio stream: {e}"))?;

            log::info!(
                "Audio output: {} Hz, {} channel(s)",
                config.sample_rate.0,
                channels
            );

            Ok(Self {
                mixer,
                sounds: load_clips(store.sounds()),
                music: load_clips(store.music_tracks()),
                _stream: stream,
            })
        }

        fn with_mixer(&self, f: impl FnOnce(&mut Mixer)) {
            match self.mixer.lock() {
                Ok(mut mixer) => f(&mut mixer),
                Err(_) => log::debug!("Audio mixer poisoned; request dropped"),
            }
        }
    }

    impl AudioOut for DeviceAudio {
        fn play_sound(&mut self, name: &str) {
            match self.sounds.get(name) {
                Some(clip) => {
                    let clip = Arc::clone(clip);
                    self.with_mixer(|m| m.play_effect(clip));
                }
                None => log::debug!("Sound '{name}' not available"),
            }
        }

        fn play_music(&mut self, name: &str) {
            match self.music.get(name) {
                Some(clip) => {
                    let clip = Arc::clone(clip);
                    self.with_mixer(|m| m.set_music(clip));
                }
                None => log::debug!("Music '{name}' not available"),
            }
        }

        fn stop_music(&mut self) {
            self.with_mixer(Mixer::stop_music);
        }
    }

    fn load_clips<'a>(
        entries: impl Iterator<Item = (&'a str, &'a Path)>,
    ) -> HashMap<String, Arc<PcmClip>> {
        let mut clips = HashMap::new();
        for (name, path) in entries {
            let decoded = std::fs::read(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))
                .and_then(|bytes| decode_wav(&bytes));
            match decoded {
                Ok(clip) => {
                    clips.insert(name.to_string(), Arc::new(clip));
                }
                Err(err) => log::warn!("Skipping audio clip '{name}': {err}"),
            }
        }
        clips
    }
}

//! Voice mixing for one-shot cues
//!
//! Cues overlap freely: each trigger becomes a voice that plays to the end of
//! its clip and is then dropped. Positioning is rendered as a constant-power
//! stereo pan derived from the X coordinate.

use sonar_core::{Placement, SoundClip};
use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

/// Voices beyond this are dropped oldest-first
pub const MAX_VOICES: usize = 32;

/// Left and right gains for `placement` on a stage `half_width` units wide
pub fn pan_gains(placement: Placement, half_width: f32) -> (f32, f32) {
    let volume = if placement.volume.is_finite() {
        placement.volume.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let pan = if half_width > 0.0 && placement.position.x.is_finite() {
        (placement.position.x / half_width).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    // -1 maps to a quarter turn left, +1 to a quarter turn right
    let angle = (pan + 1.0) * FRAC_PI_4;
    (angle.cos().max(0.0) * volume, angle.sin().max(0.0) * volume)
}

/// A clip being played
#[derive(Debug, Clone)]
pub struct Voice {
    clip: Arc<SoundClip>,
    cursor: usize,
    left: f32,
    right: f32,
}

impl Voice {
    pub fn new(clip: Arc<SoundClip>, left: f32, right: f32) -> Self {
        Self {
            clip,
            cursor: 0,
            left,
            right,
        }
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.clip.samples.len()
    }
}

/// The set of active voices
#[derive(Debug, Default)]
pub struct Mixer {
    voices: Vec<Voice>,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, voice: Voice) {
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(voice);
    }

    pub fn active(&self) -> usize {
        self.voices.len()
    }

    /// Mix all voices into interleaved `output` with `channels` channels
    ///
    /// Mono devices get the average of both pan gains. Channels past the
    /// second stay silent.
    pub fn render(&mut self, output: &mut [f32], channels: usize) {
        output.fill(0.0);
        if channels == 0 {
            return;
        }

        for voice in &mut self.voices {
            let samples = &voice.clip.samples;
            for frame in output.chunks_mut(channels) {
                let Some(&sample) = samples.get(voice.cursor) else {
                    break;
                };
                voice.cursor += 1;

                if let [left, right, ..] = frame {
                    *left += sample * voice.left;
                    *right += sample * voice.right;
                } else {
                    frame[0] += sample * (voice.left + voice.right) * 0.5;
                }
            }
        }

        for sample in output.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.voices.retain(|voice| !voice.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::Position3D;

    fn placement(x: f32, volume: f32) -> Placement {
        Placement {
            position: Position3D::new(x, 0.0, -5.0),
            volume,
        }
    }

    fn clip(samples: Vec<f32>) -> Arc<SoundClip> {
        Arc::new(SoundClip::new(samples, 48_000, "test.wav"))
    }

    #[test]
    fn centered_cue_is_balanced() {
        let (left, right) = pan_gains(placement(0.0, 1.0), 25.0);
        assert!((left - right).abs() < 1e-6);
        assert!((left * left + right * right - 1.0).abs() < 1e-5);
    }

    #[test]
    fn edge_cues_are_hard_panned() {
        let (left, right) = pan_gains(placement(-25.0, 1.0), 25.0);
        assert!((left - 1.0).abs() < 1e-6);
        assert!(right.abs() < 1e-6);

        let (left, right) = pan_gains(placement(40.0, 1.0), 25.0);
        assert!(left.abs() < 1e-6);
        assert!((right - 1.0).abs() < 1e-6);
    }

    #[test]
    fn volume_scales_both_sides() {
        let (left, right) = pan_gains(placement(0.0, 0.5), 25.0);
        let (full_left, full_right) = pan_gains(placement(0.0, 1.0), 25.0);
        assert!((left - full_left * 0.5).abs() < 1e-6);
        assert!((right - full_right * 0.5).abs() < 1e-6);
    }

    #[test]
    fn voices_are_summed_and_retired() {
        let mut mixer = Mixer::new();
        mixer.add(Voice::new(clip(vec![0.5; 2]), 1.0, 0.0));
        mixer.add(Voice::new(clip(vec![0.25; 4]), 0.0, 1.0));

        let mut output = vec![9.0; 6];
        mixer.render(&mut output, 2);

        assert_eq!(output, vec![0.5, 0.25, 0.5, 0.25, 0.0, 0.25]);
        assert_eq!(mixer.active(), 1);

        mixer.render(&mut output, 2);
        assert_eq!(output, vec![0.0, 0.25, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(mixer.active(), 0);
    }

    #[test]
    fn mono_device_gets_average() {
        let mut mixer = Mixer::new();
        mixer.add(Voice::new(clip(vec![1.0]), 1.0, 0.0));

        let mut output = vec![0.0; 2];
        mixer.render(&mut output, 1);
        assert_eq!(output, vec![0.5, 0.0]);
    }

    #[test]
    fn extra_channels_stay_silent() {
        let mut mixer = Mixer::new();
        mixer.add(Voice::new(clip(vec![0.5]), 1.0, 1.0));

        let mut output = vec![0.0; 4];
        mixer.render(&mut output, 4);
        assert_eq!(output, vec![0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn loud_overlap_is_clipped() {
        let mut mixer = Mixer::new();
        for _ in 0..4 {
            mixer.add(Voice::new(clip(vec![0.9]), 1.0, 1.0));
        }

        let mut output = vec![0.0; 2];
        mixer.render(&mut output, 2);
        assert_eq!(output, vec![1.0, 1.0]);
    }

    #[test]
    fn oldest_voice_is_dropped_when_full() {
        let mut mixer = Mixer::new();
        for _ in 0..MAX_VOICES + 3 {
            mixer.add(Voice::new(clip(vec![0.0; 8]), 1.0, 1.0));
        }
        assert_eq!(mixer.active(), MAX_VOICES);
    }
}

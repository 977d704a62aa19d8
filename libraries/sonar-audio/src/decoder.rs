/// Clip decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use sonar_core::{ClipDecoder, SoundClip};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

const SUPPORTED_EXTENSIONS: [&str; 6] = ["wav", "wave", "flac", "ogg", "oga", "mp3"];

/// Clip decoder using Symphonia
///
/// Decodes the whole file into memory and downmixes to mono by averaging
/// channels, since every cue is positioned as a point source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaClipDecoder;

impl SymphoniaClipDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode `path` into a mono clip
    pub fn decode_file(path: &Path) -> Result<SoundClip> {
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::Symphonia(format!("Failed to probe file: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

        let mut mono = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(AudioError::Symphonia(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    sample_rate.get_or_insert(spec.rate);

                    let channels = spec.channels.count().max(1);
                    let mut samples = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                    samples.copy_interleaved_ref(decoded);

                    mono.extend(samples.samples().chunks(channels).map(|frame| {
                        (frame.iter().sum::<f32>() / channels as f32).clamp(-1.0, 1.0)
                    }));
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    debug!("Skipping corrupt packet in {}: {}", path.display(), e);
                }
                Err(e) => return Err(AudioError::DecodeError(e.to_string())),
            }
        }

        let sample_rate = sample_rate
            .ok_or_else(|| AudioError::UnsupportedFormat("unknown sample rate".to_string()))?;

        Ok(SoundClip::new(mono, sample_rate, path))
    }
}

impl ClipDecoder for SymphoniaClipDecoder {
    fn decode(&self, path: &Path) -> sonar_core::Result<SoundClip> {
        Ok(Self::decode_file(path)?)
    }

    fn supports_format(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
            .unwrap_or(false)
    }
}

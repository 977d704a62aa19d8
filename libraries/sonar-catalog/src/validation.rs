//! Validation of user-supplied sound files

use crate::error::{CatalogError, Result};
use std::path::Path;

/// Sample rate the bundled sounds use
pub const RECOMMENDED_SAMPLE_RATE: u32 = 44_100;

/// Outcome of a successful validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundCheck {
    pub channels: u16,
    pub sample_rate: u32,

    /// Non-fatal remark (sample rate mismatch)
    pub warning: Option<String>,
}

/// Check that `path` is an absolute path to an existing mono WAV file
///
/// A sample rate other than 44.1 kHz is accepted with a warning.
pub fn validate_sound_file(path: &Path) -> Result<SoundCheck> {
    if !path.is_absolute() {
        return Err(CatalogError::invalid_sound(
            path,
            "The path must be absolute.",
        ));
    }

    if !path.is_file() {
        return Err(CatalogError::invalid_sound(path, "The file does not exist."));
    }

    let reader = hound::WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) => {
            CatalogError::invalid_sound(path, format!("Error reading file: {io}"))
        }
        other => CatalogError::invalid_sound(path, format!("Invalid WAV file: {other}")),
    })?;

    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(CatalogError::invalid_sound(
            path,
            format!(
                "The file must be mono (1 channel). This file has {} channels.",
                spec.channels
            ),
        ));
    }

    let warning = (spec.sample_rate != RECOMMENDED_SAMPLE_RATE).then(|| {
        format!(
            "Warning: Recommended sample rate is {} Hz. This file has {} Hz.",
            RECOMMENDED_SAMPLE_RATE, spec.sample_rate
        )
    });

    Ok(SoundCheck {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_wav(dir: &Path, name: &str, channels: u16, sample_rate: u32) -> PathBuf {
        let path = dir.join(name);
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..(100 * u32::from(channels)) {
            writer.write_sample((i % 64) as i16 * 100).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn accepts_mono_cd_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_wav(dir.path(), "ok.wav", 1, 44_100);

        let check = validate_sound_file(&path).unwrap();
        assert_eq!(check.channels, 1);
        assert!(check.warning.is_none());
    }

    #[test]
    fn warns_on_other_sample_rates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_wav(dir.path(), "48k.wav", 1, 48_000);

        let check = validate_sound_file(&path).unwrap();
        let warning = check.warning.expect("expected a sample rate warning");
        assert!(warning.contains("48000"));
    }

    #[test]
    fn rejects_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_wav(dir.path(), "stereo.wav", 2, 44_100);

        let err = validate_sound_file(&path).unwrap_err();
        assert!(err.reason().contains("mono"));
        assert!(err.reason().contains("2 channels"));
    }

    #[test]
    fn rejects_missing_and_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.wav");
        assert!(!validate_sound_file(&missing).unwrap_err().reason().is_empty());

        let relative = Path::new("sounds/button.wav");
        assert!(validate_sound_file(relative)
            .unwrap_err()
            .reason()
            .contains("absolute"));
    }

    #[test]
    fn rejects_non_wav_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();

        let err = validate_sound_file(&path).unwrap_err();
        assert!(err.reason().starts_with("Invalid WAV file"));
    }
}

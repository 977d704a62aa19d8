/// CPAL-based spatial output (dedicated audio thread)
use crate::error::{OutputError, Result};
use crate::mixer::{pan_gains, Mixer, Voice};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use sonar_core::{Placement, SoundClip, SpatialOutput};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Commands sent to the audio thread
enum AudioCommand {
    /// Start a voice
    Play(Voice),
    /// Shutdown the audio thread
    Shutdown,
}

/// Sinc parameters used when a clip's rate differs from the device rate
///
/// Cues are short and decoded once, so quality wins over speed here.
const SINC_LEN: usize = 128;
const SINC_CUTOFF: f32 = 0.95;
const OVERSAMPLING: usize = 256;

/// CPAL spatial output
///
/// **Architecture**: a dedicated audio thread owns the CPAL `Stream`, which runs
/// for the lifetime of the output and mixes whatever voices are active. The
/// host thread only resamples (once, in `prepare`) and enqueues voices, so
/// `play` never blocks.
pub struct CpalSpatialOutput {
    /// Channel to send commands to the audio thread
    command_tx: Sender<AudioCommand>,
    /// Sample rate of the output device
    sample_rate: u32,
    /// Output channel count
    channels: u16,
    /// Stage half-width used to turn X into a pan position
    half_width: f32,
    /// Handle to the audio thread
    _audio_thread: Option<JoinHandle<()>>,
}

impl CpalSpatialOutput {
    /// Open the default output device
    ///
    /// # Errors
    /// Returns an error if no audio device is found or the stream cannot start
    pub fn new(half_width: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(OutputError::DeviceNotFound)?;

        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate();
        let config = config.config();

        Self::with_device_and_config(device, config, sample_rate, half_width)
    }

    fn with_device_and_config(
        device: Device,
        config: StreamConfig,
        sample_rate: u32,
        half_width: f32,
    ) -> Result<Self> {
        let channels = config.channels;
        let (command_tx, command_rx) = bounded::<AudioCommand>(32);
        let (ready_tx, ready_rx) = bounded::<Result<()>>(1);

        let audio_thread = thread::Builder::new()
            .name("sonar-audio".to_string())
            .spawn(move || {
                Self::audio_thread_run(&device, &config, &command_rx, &ready_tx);
            })
            .map_err(|e| OutputError::StreamBuildError(e.to_string()))?;

        // The thread reports whether the stream started before taking commands
        ready_rx
            .recv()
            .map_err(|e| OutputError::ChannelClosed(e.to_string()))??;

        debug!(sample_rate, channels, "Spatial output ready");

        Ok(Self {
            command_tx,
            sample_rate,
            channels,
            half_width,
            _audio_thread: Some(audio_thread),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    fn audio_thread_run(
        device: &Device,
        config: &StreamConfig,
        command_rx: &Receiver<AudioCommand>,
        ready_tx: &Sender<Result<()>>,
    ) {
        let mixer = Arc::new(Mutex::new(Mixer::new()));

        let stream = match Self::start_stream(device, config, Arc::clone(&mixer)) {
            Ok(stream) => {
                let _ = ready_tx.send(Ok(()));
                stream
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        while let Ok(cmd) = command_rx.recv() {
            match cmd {
                AudioCommand::Play(voice) => {
                    mixer
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .add(voice);
                }
                AudioCommand::Shutdown => break,
            }
        }

        drop(stream);
    }

    fn start_stream(device: &Device, config: &StreamConfig, mixer: Arc<Mutex<Mixer>>) -> Result<Stream> {
        let channels = usize::from(config.channels);

        let stream = device.build_output_stream(
            config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                mixer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .render(data, channels);
            },
            |err| warn!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(stream)
    }
}

/// Resample a mono clip to `target_rate`
///
/// Empty clips and clips already at the target rate are returned unchanged.
pub fn resample_clip(clip: SoundClip, target_rate: u32) -> Result<SoundClip> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
        WindowFunction,
    };

    if clip.is_empty() || clip.sample_rate == target_rate || clip.sample_rate == 0 {
        return Ok(clip);
    }

    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: SINC_CUTOFF,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: OVERSAMPLING,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(target_rate) / f64::from(clip.sample_rate),
        2.0,
        params,
        clip.frames(),
        1,
    )
    .map_err(|e| OutputError::ResampleError(e.to_string()))?;

    let resampled = resampler
        .process(&[clip.samples.as_slice()], None)
        .map_err(|e| OutputError::ResampleError(e.to_string()))?;

    let samples = resampled.into_iter().next().unwrap_or_default();
    Ok(SoundClip::new(samples, target_rate, clip.source))
}

impl SpatialOutput for CpalSpatialOutput {
    fn prepare(&self, clip: SoundClip) -> sonar_core::Result<SoundClip> {
        Ok(resample_clip(clip, self.sample_rate)?)
    }

    fn play(&self, clip: &Arc<SoundClip>, placement: Placement) -> sonar_core::Result<()> {
        let (left, right) = pan_gains(placement, self.half_width);
        let voice = Voice::new(Arc::clone(clip), left, right);

        // Never block the caller; a full queue means the audio thread is stalled
        self.command_tx
            .try_send(AudioCommand::Play(voice))
            .map_err(|e| match e {
                TrySendError::Full(_) => OutputError::ChannelClosed("command queue full".into()),
                TrySendError::Disconnected(_) => {
                    OutputError::ChannelClosed("audio thread exited".into())
                }
            })?;

        Ok(())
    }
}

impl Drop for CpalSpatialOutput {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Shutdown);
    }
}

impl std::fmt::Debug for CpalSpatialOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalSpatialOutput")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("half_width", &self.half_width)
            .finish_non_exhaustive()
    }
}

//! Default output device → realtime engine.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};
use thiserror::Error;
use tracing::{error, info};

use saavy_piano::{
    synth::{realtime, RingSink},
    PianoConfig, MAX_BLOCK_SIZE,
};

/// Samples kept for the on-screen scope.
const SCOPE_CAPACITY: usize = 8192;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no default output device available")]
    NoDevice,
    #[error("failed to fetch default output config")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("unsupported sample format {0:?}, only f32 output is supported")]
    SampleFormat(cpal::SampleFormat),
    #[error("failed to build output stream")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream")]
    Play(#[from] cpal::PlayStreamError),
}

/// A running output stream. Audio stops when this is dropped.
pub struct AudioOutput {
    _stream: cpal::Stream,
    pub sample_rate: f32,
    pub channels: usize,
    pub device_name: String,
}

pub struct Connection {
    pub output: AudioOutput,
    pub sink: RingSink,
    pub scope: Consumer<f32>,
}

pub fn open(config: &PianoConfig) -> Result<Connection, AudioError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
    let supported = device.default_output_config()?;

    if supported.sample_format() != cpal::SampleFormat::F32 {
        return Err(AudioError::SampleFormat(supported.sample_format()));
    }

    let sample_rate = supported.sample_rate().0 as f32;
    let channels = supported.channels() as usize;
    let device_name = device.name().unwrap_or_else(|_| "unknown device".to_string());

    let (sink, mut engine) = realtime(sample_rate, config.master_volume, config.queue_capacity);
    let (mut scope_tx, scope) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &supported.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames_to_render];
                engine.render(block);

                // Copy to output (mono to all channels)
                let out_off = frames_written * channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = s;
                    }
                    // scope falls behind rather than blocking the callback
                    let _ = scope_tx.push(s);
                }

                frames_written += frames_to_render;
            }
        },
        |err| error!(%err, "audio stream error"),
        None,
    )?;

    stream.play()?;
    info!(device = %device_name, sample_rate, channels, "audio output started");

    Ok(Connection {
        output: AudioOutput {
            _stream: stream,
            sample_rate,
            channels,
            device_name,
        },
        sink,
        scope,
    })
}

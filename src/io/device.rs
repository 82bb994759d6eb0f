//! Audio output through `cpal`.
//!
//! The stream is negotiated strictly: the device must offer i16 samples at the
//! configured channel count and sample rate, otherwise opening fails with
//! [`Error::UnsupportedFormat`]. A fixed frame size is requested when the
//! device advertises a buffer range containing it; otherwise the backend's
//! default buffer size is used. The renderer fills whatever length the backend
//! asks for.

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, SampleFormat, SampleRate, StreamConfig, SupportedBufferSize,
};

use crate::{
    config::EngineConfig,
    error::{Error, Result},
    synth::AudioRenderer,
    MAX_BLOCK_SIZE,
};

/// A running output stream. Audio stops when this is dropped.
pub struct OutputStream {
    stream: cpal::Stream,
    config: StreamConfig,
    device_name: String,
}

impl OutputStream {
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Stop pulling samples. The stream stays open until dropped.
    pub fn pause(&self) -> Result<()> {
        self.stream.pause()?;
        Ok(())
    }
}

/// Open the default output device and start pulling samples from `renderer`.
pub fn open_output(config: &EngineConfig, mut renderer: AudioRenderer) -> Result<OutputStream> {
    config.validate()?;

    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
    let device_name = device.name().unwrap_or_else(|_| "<unnamed>".to_string());
    let stream_config = negotiate(&device, config)?;

    log::info!(
        "opening `{}`: {} Hz, {} ch, i16, buffer {:?}",
        device_name,
        stream_config.sample_rate.0,
        stream_config.channels,
        stream_config.buffer_size
    );

    let channels = stream_config.channels as usize;
    let mut mono = vec![0i16; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &stream_config,
        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
            if channels == 1 {
                renderer.render(data);
                return;
            }

            // Render mono, then duplicate into every channel of the frame
            for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                let block = &mut mono[..chunk.len() / channels];
                renderer.render(block);
                for (frame, &s) in chunk.chunks_mut(channels).zip(block.iter()) {
                    frame.fill(s);
                }
            }
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )?;

    stream.play()?;

    Ok(OutputStream {
        stream,
        config: stream_config,
        device_name,
    })
}

fn negotiate(device: &cpal::Device, config: &EngineConfig) -> Result<StreamConfig> {
    let rate = SampleRate(config.sample_rate);
    let unsupported = Error::UnsupportedFormat {
        sample_rate: config.sample_rate,
        channels: config.channels,
    };

    let range = device
        .supported_output_configs()?
        .find(|range| {
            range.sample_format() == SampleFormat::I16
                && range.channels() == config.channels
                && range.min_sample_rate() <= rate
                && rate <= range.max_sample_rate()
        })
        .ok_or(unsupported)?;

    Ok(StreamConfig {
        channels: config.channels,
        sample_rate: rate,
        buffer_size: buffer_size(range.buffer_size(), config.frame_size),
    })
}

fn buffer_size(supported: &SupportedBufferSize, frame_size: u32) -> BufferSize {
    match supported {
        SupportedBufferSize::Range { min, max } if (*min..=*max).contains(&frame_size) => {
            BufferSize::Fixed(frame_size)
        }
        _ => {
            log::warn!("device does not accept {frame_size}-sample buffers, using its default");
            BufferSize::Default
        }
    }
}

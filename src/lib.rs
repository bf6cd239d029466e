//! pcm-pipe - Raw PCM streaming between ALSA devices and standard I/O.
//!
//! Two thin binaries share this library: `pcm-capture` records mono S16LE
//! frames from a capture device and writes them to stdout; `pcm-play` reads
//! stereo S16LE samples from stdin and renders them on a playback device.
//! The stream is bare interleaved samples at the negotiated rate, with no
//! header or framing, so the two tools compose over an ordinary pipe.

pub mod capture;
pub mod config;
pub mod device;
pub mod frames;
pub mod playback;
pub mod session;

pub use config::StreamOpts;
pub use device::{Device, DeviceError, FrameIo, Route, StreamParams};

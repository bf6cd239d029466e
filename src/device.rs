//! ALSA PCM device session: open, hardware negotiation, frame transfer.

use std::fmt;

use alsa::pcm::{Access, Format, HwParams, IO, PCM};
use alsa::{Direction, ValueOr};
use thiserror::Error;

/// Errors raised by the device layer.
///
/// Open and configuration failures are fatal to the process; a transfer
/// failure only ends the streaming loop and still goes through the normal
/// drain/close path.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("unable to open pcm device \"{device}\": {err}")]
    OpenFailed { device: String, err: alsa::Error },
    #[error("unable to set hw parameters on \"{device}\": {err}")]
    ConfigFailed { device: String, err: alsa::Error },
    #[error("pcm transfer failed: {0}")]
    TransferFailed(alsa::Error),
}

/// Which way audio flows through the process.
///
/// The channel policy is fixed per direction: capture produces mono on
/// stdout, playback consumes stereo from stdin. Only the sample rate is
/// negotiated with the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Device → stdout, 1 channel.
    Capture,
    /// Stdin → device, 2 channels.
    Playback,
}

impl Route {
    pub fn channels(self) -> u32 {
        match self {
            Route::Capture => 1,
            Route::Playback => 2,
        }
    }

    fn direction(self) -> Direction {
        match self {
            Route::Capture => Direction::Capture,
            Route::Playback => Direction::Playback,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Capture => write!(f, "capture"),
            Route::Playback => write!(f, "playback"),
        }
    }
}

/// Parameters actually in effect after hardware negotiation.
///
/// The driver may substitute the closest supported rate for the requested
/// one; everything downstream must use these values, never the request.
#[derive(Debug, Clone, Copy)]
pub struct StreamParams {
    pub rate: u32,
    pub channels: u32,
}

/// Frame-level transfer seam between the streaming loops and the device.
///
/// Both methods count in frames (one sample per channel), not bytes or
/// samples. Implemented by [`AlsaIo`] for real hardware; tests script their
/// own implementations.
pub trait FrameIo {
    /// Read up to `buf.len() / channels` frames; returns frames read.
    fn read_frames(&mut self, buf: &mut [i16]) -> Result<usize, DeviceError>;
    /// Write the interleaved frames in `buf`; returns frames written.
    fn write_frames(&mut self, buf: &[i16]) -> Result<usize, DeviceError>;
}

/// Interleaved S16 transfer handle borrowed from an open [`Device`].
pub struct AlsaIo<'a>(IO<'a, i16>);

impl FrameIo for AlsaIo<'_> {
    fn read_frames(&mut self, buf: &mut [i16]) -> Result<usize, DeviceError> {
        self.0.readi(buf).map_err(DeviceError::TransferFailed)
    }

    fn write_frames(&mut self, buf: &[i16]) -> Result<usize, DeviceError> {
        self.0.writei(buf).map_err(DeviceError::TransferFailed)
    }
}

/// An open, configured PCM endpoint in one direction.
pub struct Device {
    name: String,
    pcm: PCM,
    params: StreamParams,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Device {
    /// Open `name` for the given route and negotiate hardware parameters:
    /// interleaved access, S16LE, the route's fixed channel count, and the
    /// supported rate nearest to `rate`.
    pub fn open(name: &str, route: Route, rate: u32) -> Result<Device, DeviceError> {
        let pcm = PCM::new(name, route.direction(), false).map_err(|err| {
            DeviceError::OpenFailed { device: name.to_string(), err }
        })?;

        let params = configure(&pcm, route, rate).map_err(|err| {
            DeviceError::ConfigFailed { device: name.to_string(), err }
        })?;

        Ok(Device { name: name.to_string(), pcm, params })
    }

    pub fn params(&self) -> StreamParams {
        self.params
    }

    /// Borrow the interleaved S16 transfer handle.
    pub fn frame_io(&self) -> Result<AlsaIo<'_>, DeviceError> {
        let io = self.pcm.io_i16().map_err(|err| DeviceError::ConfigFailed {
            device: self.name.clone(),
            err,
        })?;
        Ok(AlsaIo(io))
    }

    /// Drain pending frames, then release the handle.
    ///
    /// Consumes the device, so drain and close happen exactly once per
    /// session no matter how the streaming loop ended.
    pub fn close(self) {
        if let Err(err) = self.pcm.drain() {
            log::warn!("pcm drain failed: {}", err);
        }
    }
}

fn configure(pcm: &PCM, route: Route, rate: u32) -> Result<StreamParams, alsa::Error> {
    {
        let hwp = HwParams::any(pcm)?;
        hwp.set_access(Access::RWInterleaved)?;
        hwp.set_format(Format::S16LE)?;
        hwp.set_channels(route.channels())?;
        hwp.set_rate_near(rate, ValueOr::Nearest)?;
        pcm.hw_params(&hwp)?;
    }

    // Read back what the hardware actually accepted
    let hwp = pcm.hw_params_current()?;
    Ok(StreamParams {
        rate: hwp.get_rate()?,
        channels: hwp.get_channels()?,
    })
}

//! One streaming session: open, negotiate, transfer, drain, close.

use std::io;

use anyhow::Result;

use crate::config::StreamOpts;
use crate::device::{Device, Route};
use crate::frames::{CHUNK_BYTES, SAMPLE_WIDTH};
use crate::{capture, playback};

/// Run one session in the given direction until the stream ends.
///
/// Open or configuration failures abort the run and surface to the caller.
/// Once streaming has started the policy is best effort: a device transfer
/// error ends the loop and is reported, but the session still drains and
/// closes normally and the process exit code stays zero.
pub fn run(route: Route, opts: &StreamOpts) -> Result<()> {
    // 1. Open the device and negotiate hardware parameters
    let device = Device::open(&opts.device, route, opts.rate)?;
    let params = device.params();
    log::info!(
        "{} \"{}\": rate={} Hz (requested {}), channels={}",
        route,
        opts.device,
        params.rate,
        opts.rate,
        params.channels,
    );

    // 2. Transfer handle plus one fixed-size chunk, reused every iteration
    let mut pcm_io = device.frame_io()?;
    let mut bytes = vec![0u8; CHUNK_BYTES];
    let mut samples = vec![0i16; CHUNK_BYTES / SAMPLE_WIDTH];
    let channels = params.channels as usize;

    // 3. Stream until end of input or a device error
    let outcome = match route {
        Route::Capture => {
            let stdout = io::stdout();
            capture::run(&mut pcm_io, &mut stdout.lock(), &mut samples, &mut bytes, channels)
        }
        Route::Playback => {
            let stdin = io::stdin();
            playback::run(&mut pcm_io, &mut stdin.lock(), &mut bytes, &mut samples, channels)
        }
    };
    if let Err(err) = outcome {
        log::error!("{} stream ended: {}", route, err);
    }

    // 4. Drain pending frames and release the device
    drop(pcm_io);
    device.close();
    Ok(())
}

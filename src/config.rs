//! Command-line options shared by both tools.

use clap::Parser;

/// Stream raw S16LE PCM between an ALSA device and standard I/O.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct StreamOpts {
    /// ALSA device name (e.g. "default", "plughw:0,0")
    #[arg(long, short = 'd', default_value = "default")]
    pub device: String,

    /// Desired sample rate in Hz; the hardware may pick the nearest
    /// supported rate
    #[arg(long, short = 'r', default_value_t = 44100)]
    pub rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_wire_contract() {
        let opts = StreamOpts::try_parse_from(["pcm-capture"]).unwrap();
        assert_eq!(opts.device, "default");
        assert_eq!(opts.rate, 44100);
    }

    #[test]
    fn explicit_values_are_honored() {
        let opts =
            StreamOpts::try_parse_from(["pcm-play", "--device", "plughw:1,0", "--rate", "48000"])
                .unwrap();
        assert_eq!(opts.device, "plughw:1,0");
        assert_eq!(opts.rate, 48000);
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(StreamOpts::try_parse_from(["pcm-play", "--loop"]).is_err());
    }
}

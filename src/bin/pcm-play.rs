use anyhow::Result;
use clap::Parser;

use pcm_pipe::{Route, StreamOpts, session};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = StreamOpts::parse();
    session::run(Route::Playback, &opts)
}

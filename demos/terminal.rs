//! Run the stopwatch in the terminal.
//!
//! ```text
//! cargo run --example terminal
//! STOPWATCH_CONFIG=stopwatch.toml cargo run --example terminal
//! ```
//!
//! Pausing copies the duration to the system clipboard. Logs go to
//! `$TMPDIR/spark-stopwatch.log` since the terminal is busy.

use std::path::PathBuf;
use std::rc::Rc;

use spark_stopwatch::logging;
use spark_stopwatch::{
    EventLoop, MountPoint, Stopwatch, StopwatchConfig, SystemClipboard, SystemClock, TerminalHost,
    TimerEnv,
};

fn main() -> spark_stopwatch::Result<()> {
    let _guard = logging::init_file(&std::env::temp_dir(), "spark-stopwatch.log")?;

    let config = match std::env::var_os("STOPWATCH_CONFIG") {
        Some(path) => StopwatchConfig::load(&PathBuf::from(path))?,
        None => StopwatchConfig::default(),
    };

    let clock = Rc::new(SystemClock);
    let event_loop = Rc::new(EventLoop::new(clock.clone()));
    let env = TimerEnv::new(event_loop.clone(), clock, Rc::new(SystemClipboard));

    let stopwatch = Stopwatch::new(MountPoint::detached(), env, config)?;
    let host = TerminalHost::new(stopwatch.mount_point().clone(), event_loop);

    println!("Tab/←/→ focus · Enter/Space click · r reset · q quit");
    host.run()?;

    println!("last duration: {}", stopwatch.display_state().duration);
    Ok(())
}

use std::thread;
use std::time::Duration;

use throttled_logger::{warn, ConsoleSink, ThrottledEmitter};

fn main() -> color_eyre::Result<()> {
    logger::tracing::setup();
    let logger = ThrottledEmitter::default();

    // a sensor that is polled every 100ms and keeps failing, it should only
    // show up in the log once every second
    for attempt in 0..25 {
        warn!(logger, "sensor-poll", 1.0; "could not read sensor, attempt {attempt}")?;
        thread::sleep(Duration::from_millis(100));
    }

    let console = ThrottledEmitter::new(ConsoleSink::stdio());
    for i in 0..5 {
        console.log(format_args!("progress {i}"), None, 0.5)?;
        console.error("disk almost full", "disk", 60.0)?;
        thread::sleep(Duration::from_millis(300));
    }

    Ok(())
}

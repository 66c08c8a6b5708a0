use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use throttled_logger::ThrottledEmitter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> Vec<String> {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.lines()
}

#[test]
fn each_severity_becomes_a_tagged_event() {
    let lines = capture(|| {
        let emitter = ThrottledEmitter::default();
        emitter.debug("d", "d", 0.0).unwrap();
        emitter.info("i", "i", 0.0).unwrap();
        emitter.log("l", "l", 0.0).unwrap();
        emitter.warn("w", "w", 0.0).unwrap();
        emitter.error("e", "e", 0.0).unwrap();
    });

    assert_eq!(lines.len(), 5, "{lines:#?}");
    let expected = [
        ("DEBUG", "severity=debug", "d"),
        ("INFO", "severity=info", "i"),
        ("INFO", "severity=log", "l"),
        ("WARN", "severity=warn", "w"),
        ("ERROR", "severity=error", "e"),
    ];
    for (line, (level, field, message)) in lines.iter().zip(expected) {
        assert_eq!(line.split_whitespace().next(), Some(level), "{line}");
        assert!(line.contains(field), "{line}");
        assert!(line.contains(&format!(": {message} ")), "{line}");
    }
}

#[test]
fn events_point_at_the_calling_code() {
    let mut expected = Vec::new();
    let lines = capture(|| {
        let emitter = ThrottledEmitter::default();
        expected.push(format!("tracing_sink.rs:{}:", line!() + 1));
        emitter.info("direct", "a", 0.0).unwrap();
        expected.push(format!("tracing_sink.rs:{}:", line!() + 1));
        throttled_logger::log!(emitter, "b", 0.0; "through {}", "macro").unwrap();
        expected.push(format!("tracing_sink.rs:{}:", line!() + 1));
        emitter.emit(throttled_logger::Severity::Warn, "emit", "c", 0.0).unwrap();
    });

    assert_eq!(lines.len(), 3, "{lines:#?}");
    for (line, location) in lines.iter().zip(&expected) {
        assert!(line.contains(location), "expected {location} in: {line}");
        assert!(!line.contains("src/sink.rs"), "{line}");
    }
}

#[test]
fn suppressed_messages_emit_no_event() {
    let lines = capture(|| {
        let emitter = ThrottledEmitter::default();
        for i in 0..10 {
            emitter.warn(i, "burst", 60.0).unwrap();
        }
    });

    assert_eq!(lines.len(), 1, "{lines:#?}");
    assert!(lines[0].contains(": 0 "), "{}", lines[0]);
}

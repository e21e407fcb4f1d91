//! In-process intent sinks.

use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_model::intent::{Intent, IntentRecord};

use crate::IntentSink;

/// Logs gesture intents through `tracing`; moves go to trace level.
#[derive(Debug, Default)]
pub struct LogSink;

impl IntentSink for LogSink {
    fn emit(&mut self, record: &IntentRecord) -> PinchpointResult<()> {
        match record.intent {
            Intent::Move { x, y } => tracing::trace!(t = record.timestamp_ns, x, y, "move"),
            Intent::Scroll { step } => tracing::info!(t = record.timestamp_ns, step, "scroll"),
            other => tracing::info!(t = record.timestamp_ns, intent = other.label(), "button"),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Sends every intent to each inner sink in order.
pub struct FanoutSink {
    sinks: Vec<Box<dyn IntentSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn IntentSink>>) -> Self {
        Self { sinks }
    }
}

impl IntentSink for FanoutSink {
    fn emit(&mut self, record: &IntentRecord) -> PinchpointResult<()> {
        for sink in &mut self.sinks {
            sink.emit(record)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> PinchpointResult<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fanout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sink_accepts_everything() {
        let mut sink = LogSink;
        for intent in [
            Intent::Move { x: 1, y: 2 },
            Intent::DragStart,
            Intent::Scroll { step: 60 },
        ] {
            sink.emit(&IntentRecord {
                timestamp_ns: 0,
                intent,
            })
            .unwrap();
        }
        assert_eq!(sink.name(), "log");
    }
}

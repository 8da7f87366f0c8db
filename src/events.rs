//! Replay of a recorded snapshot traversal
//!
//! A traversal is stored as JSON Lines, one event per line:
//!
//! ```text
//! {"event":"start"}
//! {"event":"enter","element":"INODE"}
//! {"event":"value","element":"INODE_PATH","value":"/user"}
//! {"event":"enter_counted","element":"BLOCKS","key":"NUM_BLOCKS","count":-1}
//! {"event":"leave"}
//! {"event":"leave"}
//! {"event":"finish"}
//! ```
//!
//! Values and counts may be JSON numbers or strings; both are delivered to the
//! visitor in the form they were recorded.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::element::ImageElement;
use crate::error::{Error, Result};
use crate::visitor::ImageVisitor;

/// Leaf payload as recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Number(i64),
    Text(String),
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Number(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

/// One traversal callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Start,
    Enter {
        element: ImageElement,
    },
    EnterCounted {
        element: ImageElement,
        key: ImageElement,
        count: Payload,
    },
    Leave,
    Value {
        element: ImageElement,
        value: Payload,
    },
    Finish,
}

impl Event {
    pub fn value(element: ImageElement, value: impl Into<Payload>) -> Self {
        Event::Value {
            element,
            value: value.into(),
        }
    }

    /// Invoke the matching visitor callback.
    pub fn deliver<V: ImageVisitor + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        match self {
            Event::Start => visitor.start(),
            Event::Enter { element } => visitor.enter_scope(*element),
            Event::EnterCounted {
                element,
                key,
                count: Payload::Number(n),
            } => visitor.enter_scope_counted(*element, *key, *n),
            Event::EnterCounted {
                element,
                key,
                count: Payload::Text(s),
            } => visitor.enter_scope_counted_text(*element, *key, s),
            Event::Leave => visitor.leave_scope(),
            Event::Value {
                element,
                value: Payload::Number(n),
            } => visitor.visit_number(*element, *n),
            Event::Value {
                element,
                value: Payload::Text(s),
            } => visitor.visit_text(*element, s),
            Event::Finish => visitor.finish(),
        }
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events delivered to the visitor, including the final finish event
    pub events: usize,
    /// Whether the recording ended with a finish event
    pub completed: bool,
}

/// Drives a visitor from a recorded event stream.
pub struct EventReplay<R> {
    input: R,
}

impl<R: BufRead> EventReplay<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Deliver every recorded event to `visitor`.
    ///
    /// If the recording stops before a finish event, or a line cannot be
    /// decoded, the visitor is finished abnormally. Decoding failures are
    /// then returned as [`Error::MalformedEvent`]. Errors raised by the
    /// visitor itself are returned as-is without finishing it.
    pub fn run<V: ImageVisitor + ?Sized>(self, visitor: &mut V) -> Result<ReplaySummary> {
        let mut events = 0usize;

        for (index, line) in self.input.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::debug!("reading events failed after {} events: {}", events, e);
                    visitor.finish_abnormally()?;
                    return Err(e.into());
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let event: Event = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(source) => {
                    visitor.finish_abnormally()?;
                    return Err(Error::MalformedEvent {
                        line: index + 1,
                        source,
                    });
                }
            };

            event.deliver(visitor)?;
            events += 1;

            if event == Event::Finish {
                return Ok(ReplaySummary {
                    events,
                    completed: true,
                });
            }
        }

        tracing::debug!("event stream ended after {} events without finish", events);
        visitor.finish_abnormally()?;
        Ok(ReplaySummary {
            events,
            completed: false,
        })
    }
}

/// Serialize events as JSON Lines.
pub fn to_json_lines(events: &[Event]) -> serde_json::Result<String> {
    let mut out = String::new();
    for event in events {
        out.push_str(&serde_json::to_string(event)?);
        out.push('\n');
    }
    Ok(out)
}

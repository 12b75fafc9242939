//! Stack-frame classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of a raw stack trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackFrame<'a> {
    /// Frame from the logging framework's own code
    Framework(&'a str),
    /// Any other frame
    Application(&'a str),
}

impl<'a> StackFrame<'a> {
    /// Classify a line by whether it contains the framework marker
    pub fn classify(line: &'a str, marker: &str) -> Self {
        if line.contains(marker) {
            StackFrame::Framework(line)
        } else {
            StackFrame::Application(line)
        }
    }

    pub fn line(&self) -> &'a str {
        match *self {
            StackFrame::Framework(line) | StackFrame::Application(line) => line,
        }
    }

    pub fn is_framework(&self) -> bool {
        matches!(self, StackFrame::Framework(_))
    }

    /// The `Class.Method` token in front of the first `:`
    ///
    /// `None` for framework frames, lines without a `:`, and tokens without a `.`.
    pub fn call_site(&self) -> Option<&'a str> {
        let StackFrame::Application(line) = *self else {
            return None;
        };

        let (head, _) = line.split_once(':')?;
        let head = head.trim();
        head.contains('.').then_some(head)
    }
}

/// `Class.Method`-shaped label of the calling code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operation(String);

impl Operation {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Everything before the last `.`
    pub fn class_name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(class, _)| class)
    }

    /// Everything after the last `.`
    pub fn method_name(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(_, method)| method)
    }
}

impl From<&str> for Operation {
    fn from(value: &str) -> Self {
        Operation(value.to_string())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

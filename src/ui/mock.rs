//! Recording UI for tests.
//!
//! # Example
//!
//! ```
//! use bootstrapper::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting setup");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Starting setup"));
//! assert!(ui.has_success("Done!"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{SpinnerHandle, UserInterface};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(String),
    Detail(String),
    Success(String),
    Warning(String),
    Error(String),
    Hint(String),
    Header(String),
    Spinner(String),
}

type Journal = Rc<RefCell<Vec<Entry>>>;

/// Records every call in order. Spinner results are recorded as
/// successes and errors.
#[derive(Debug, Default)]
pub struct MockUI {
    journal: Journal,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, in order.
    pub fn entries(&self) -> Vec<Entry> {
        self.journal.borrow().clone()
    }

    fn texts(&self, kind: fn(&Entry) -> Option<&String>) -> Vec<String> {
        self.journal.borrow().iter().filter_map(kind).cloned().collect()
    }

    fn any(&self, kind: fn(&Entry) -> Option<&String>, needle: &str) -> bool {
        self.journal
            .borrow()
            .iter()
            .filter_map(kind)
            .any(|text| text.contains(needle))
    }

    pub fn headers(&self) -> Vec<String> {
        self.texts(|e| match e {
            Entry::Header(t) => Some(t),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.texts(|e| match e {
            Entry::Warning(t) => Some(t),
            _ => None,
        })
    }

    pub fn spinners(&self) -> Vec<String> {
        self.texts(|e| match e {
            Entry::Spinner(t) => Some(t),
            _ => None,
        })
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.any(
            |e| match e {
                Entry::Message(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_detail(&self, needle: &str) -> bool {
        self.any(
            |e| match e {
                Entry::Detail(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.any(
            |e| match e {
                Entry::Success(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.any(
            |e| match e {
                Entry::Warning(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.any(
            |e| match e {
                Entry::Error(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_hint(&self, needle: &str) -> bool {
        self.any(
            |e| match e {
                Entry::Hint(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    fn record(&self, entry: Entry) {
        self.journal.borrow_mut().push(entry);
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.record(Entry::Message(msg.to_string()));
    }

    fn detail(&mut self, msg: &str) {
        self.record(Entry::Detail(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.record(Entry::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.record(Entry::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.record(Entry::Error(msg.to_string()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.record(Entry::Hint(hint.to_string()));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(Entry::Spinner(message.to_string()));
        Box::new(MockSpinner {
            journal: Rc::clone(&self.journal),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.record(Entry::Header(title.to_string()));
    }
}

struct MockSpinner {
    journal: Journal,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.journal
            .borrow_mut()
            .push(Entry::Success(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.journal.borrow_mut().push(Entry::Error(msg.to_string()));
    }
}

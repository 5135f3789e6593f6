//! Text bindings the client writes to: page title, heading, input field and log.
//!
//! `MemoryView` keeps the page in memory (and every log write, for inspection).
//! `TerminalView` draws the log to stdout.

use std::io::Write;
use std::sync::Mutex;

pub const DEFAULT_TITLE: &str = "Chat";
pub const DEFAULT_HEADING: &str = "Ask a question";
pub const DEFAULT_PLACEHOLDER: &str = "Type your question...";

/// The bindings of the chat page. Implementations use interior mutability so a
/// view can be shared between the controller and its ticker task.
pub trait View: Send + Sync {
    fn set_title(&self, title: &str);
    fn set_heading(&self, heading: &str);
    fn set_placeholder(&self, placeholder: &str);

    fn log_text(&self) -> String;
    fn set_log(&self, text: &str);

    fn input_value(&self) -> String;
    fn set_input(&self, value: &str);
    fn clear_input(&self) {
        self.set_input("");
    }
}

/// Snapshot of every binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub heading: String,
    pub placeholder: String,
    pub log: String,
    pub input: String,
}

impl Default for Page {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_TITLE, DEFAULT_HEADING, DEFAULT_PLACEHOLDER)
    }
}

impl Page {
    pub fn with_defaults(title: &str, heading: &str, placeholder: &str) -> Self {
        Self {
            title: title.to_string(),
            heading: heading.to_string(),
            placeholder: placeholder.to_string(),
            log: String::new(),
            input: String::new(),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    page: Page,
    log_writes: Vec<String>,
}

/// In-memory page.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<MemoryState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.lock().page.clone()
    }

    /// Every text written to the log, oldest first.
    pub fn log_writes(&self) -> Vec<String> {
        self.lock().log_writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned page is still a readable page.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl View for MemoryView {
    fn set_title(&self, title: &str) {
        self.lock().page.title = title.to_string();
    }

    fn set_heading(&self, heading: &str) {
        self.lock().page.heading = heading.to_string();
    }

    fn set_placeholder(&self, placeholder: &str) {
        self.lock().page.placeholder = placeholder.to_string();
    }

    fn log_text(&self) -> String {
        self.lock().page.log.clone()
    }

    fn set_log(&self, text: &str) {
        let mut state = self.lock();
        state.page.log = text.to_string();
        state.log_writes.push(text.to_string());
    }

    fn input_value(&self) -> String {
        self.lock().page.input.clone()
    }

    fn set_input(&self, value: &str) {
        self.lock().page.input = value.to_string();
    }
}

/// Draws the page to stdout.
///
/// When `live` is set every log write clears the screen and redraws the
/// heading and log, so the placeholder animates in place. Otherwise writes are
/// only stored, and the caller prints with [`TerminalView::print_log`].
#[derive(Debug)]
pub struct TerminalView {
    page: Mutex<Page>,
    live: bool,
}

impl TerminalView {
    pub fn new(page: Page, live: bool) -> Self {
        Self {
            page: Mutex::new(page),
            live,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn page(&self) -> Page {
        self.lock().clone()
    }

    /// Print the current log to stdout.
    pub fn print_log(&self) {
        let log = self.lock().log.clone();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = write!(out, "{}", log);
        let _ = out.flush();
    }

    /// Prompt line built from the placeholder binding.
    pub fn prompt(&self) -> String {
        format!("{} > ", self.lock().placeholder)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn redraw(&self, page: &Page) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // Clear screen, cursor home.
        let _ = write!(out, "\x1b[2J\x1b[H");
        let _ = writeln!(out, "{}\n", page.heading);
        let _ = write!(out, "{}", page.log);
        let _ = out.flush();
    }
}

impl View for TerminalView {
    fn set_title(&self, title: &str) {
        self.lock().title = title.to_string();
        if self.live {
            // xterm window title.
            let mut out = std::io::stdout();
            let _ = write!(out, "\x1b]0;{}\x07", title);
            let _ = out.flush();
        }
    }

    fn set_heading(&self, heading: &str) {
        self.lock().heading = heading.to_string();
    }

    fn set_placeholder(&self, placeholder: &str) {
        self.lock().placeholder = placeholder.to_string();
    }

    fn log_text(&self) -> String {
        self.lock().log.clone()
    }

    fn set_log(&self, text: &str) {
        let mut page = self.lock();
        page.log = text.to_string();
        if self.live {
            self.redraw(&page);
        }
    }

    fn input_value(&self) -> String {
        self.lock().input.clone()
    }

    fn set_input(&self, value: &str) {
        self.lock().input = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_view_starts_with_defaults() {
        let view = MemoryView::new();
        let page = view.page();
        assert_eq!(page.title, DEFAULT_TITLE);
        assert_eq!(page.heading, DEFAULT_HEADING);
        assert_eq!(page.placeholder, DEFAULT_PLACEHOLDER);
        assert!(page.log.is_empty());
    }

    #[test]
    fn memory_view_records_log_writes() {
        let view = MemoryView::new();
        view.set_log("a");
        view.set_log("b");
        assert_eq!(view.log_text(), "b");
        assert_eq!(view.log_writes(), ["a", "b"]);
    }

    #[test]
    fn clear_input_empties_the_field() {
        let view = TerminalView::new(Page::default(), false);
        view.set_input("hello");
        view.clear_input();
        assert_eq!(view.input_value(), "");
    }
}

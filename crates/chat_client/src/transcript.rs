//! Exchange list, placeholder cycle and transcript rendering.

use std::collections::VecDeque;

/// Answer text an exchange starts with while the request is in flight.
pub const INITIAL_PLACEHOLDER: &str = ".";

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

impl Exchange {
    pub fn pending(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: INITIAL_PLACEHOLDER.to_string(),
        }
    }

    /// Advance the placeholder one step: `.` → `..` → `...` → `.`.
    pub fn tick(&mut self) {
        self.answer = next_placeholder(&self.answer);
    }

    /// This exchange's "You: … / Bot: …" block.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push_str("You: ");
        out.push_str(&self.question);
        out.push_str("\n\nBot: ");
        out.push_str(&self.answer);
        out.push_str("\n\n");
    }
}

pub fn next_placeholder(current: &str) -> String {
    if current.len() >= 3 {
        INITIAL_PLACEHOLDER.to_string()
    } else {
        format!("{current}.")
    }
}

/// Line echoed into the log the moment a question is submitted.
pub fn echo_line(question: &str) -> String {
    format!("You: {question}\n\n")
}

/// Exchanges of one session, most recent first.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    exchanges: VecDeque<Exchange>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_front(&mut self, exchange: Exchange) {
        self.exchanges.push_front(exchange);
    }

    /// The most recent exchange.
    pub fn latest_mut(&mut self) -> Option<&mut Exchange> {
        self.exchanges.front_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// Full "You: … / Bot: …" rendering in list order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for exchange in &self.exchanges {
            exchange.render_into(&mut out);
        }
        out
    }
}

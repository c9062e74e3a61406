//! Page and table view that write to the terminal.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::platform::{GameView, Page, Region};

/// A "page" for the terminal: alerts are printed, navigation only moves
/// `location`.
#[derive(Debug)]
pub struct TerminalPage {
    location: String,
    color: bool,
}

impl TerminalPage {
    pub fn new() -> Self {
        Self {
            location: "/".into(),
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Default for TerminalPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for TerminalPage {
    fn alert(&mut self, message: &str) {
        if self.color {
            println!("{} {}", "[ALERT]".bold().yellow(), message);
        } else {
            println!("[ALERT] {}", message);
        }
    }

    fn navigate(&mut self, path: &str) {
        tracing::info!(from = %self.location, to = %path, "navigate");
        self.location = path.to_string();
    }
}

/// Prints each region as it is replaced. In JSON mode every write becomes one
/// line `{"region": .., "content": ..}` carrying the raw content.
#[derive(Debug)]
pub struct TerminalView {
    json: bool,
    color: bool,
}

impl TerminalView {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            color: std::io::stdout().is_terminal(),
        }
    }

    fn show(&self, region: Region, content: &str) {
        if self.json {
            let line = serde_json::json!({
                "region": region.element_id(),
                "content": content,
            });
            println!("{}", line);
            return;
        }
        let label = format!("[{}]", region.element_id());
        let text = html_to_text(content);
        if self.color {
            println!("{} {}", label.bold().cyan(), text);
        } else {
            println!("{} {}", label, text);
        }
    }
}

impl GameView for TerminalView {
    fn set_text(&mut self, region: Region, text: &str) {
        self.show(region, text);
    }

    fn set_html(&mut self, region: Region, html: &str) {
        self.show(region, html);
    }
}

/// Line breaks become newlines, indented under the region label.
fn html_to_text(html: &str) -> String {
    html.replace("<br>", "\n    ")
}

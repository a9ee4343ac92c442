//! Terminal renditions of the progress widgets and the results navigator.

use spotwatch_client::{Navigator, PercentText, ProgressFill, StatusBadge};
use spotwatch_core::PresentationState;
use tokio::sync::mpsc;
use url::Url;

const BAR_WIDTH: usize = 30;

pub struct TerminalProgressBar;

impl ProgressFill for TerminalProgressBar {
    fn set_fill(&mut self, percent: u8) {
        let filled = BAR_WIDTH * usize::from(percent) / 100;
        println!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    }

    fn set_value_now(&mut self, _percent: u8) {
        // The bar line already carries the value.
    }
}

pub struct TerminalStatusBadge;

impl StatusBadge for TerminalStatusBadge {
    fn set_presentation(&mut self, presentation: &PresentationState) {
        let marker = match presentation.badge_class {
            "bg-success" => "✔",
            "bg-danger" => "✖",
            "bg-warning" => "■",
            _ => "…",
        };
        println!("{marker} {}", presentation.label);
    }
}

pub struct TerminalPercentText;

impl PercentText for TerminalPercentText {
    fn set_text(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Prints the results address and tells the watch loop it can stop.
pub struct TerminalNavigator {
    done: mpsc::UnboundedSender<Url>,
}

impl TerminalNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Url>) {
        let (done, rx) = mpsc::unbounded_channel();
        (Self { done }, rx)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, target: &Url) {
        println!("Results ready: {target}");
        let _ = self.done.send(target.clone());
    }
}

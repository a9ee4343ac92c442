use spotwatch_core::{JobView, PresentationState};
use url::Url;

/// Progress bar: visual fill plus the accessible current value.
pub trait ProgressFill: Send {
    fn set_fill(&mut self, percent: u8);
    fn set_value_now(&mut self, percent: u8);
}

pub trait StatusBadge: Send {
    fn set_presentation(&mut self, presentation: &PresentationState);
}

pub trait PercentText: Send {
    fn set_text(&mut self, text: &str);
}

/// Full-page navigation target.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &Url);
}

/// The widgets a controller renders into. Any of them may be absent.
#[derive(Default)]
pub struct WidgetBindings {
    progress_fill: Option<Box<dyn ProgressFill>>,
    status_badge: Option<Box<dyn StatusBadge>>,
    percent_text: Option<Box<dyn PercentText>>,
}

impl WidgetBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress_fill(mut self, widget: impl ProgressFill + 'static) -> Self {
        self.progress_fill = Some(Box::new(widget));
        self
    }

    pub fn with_status_badge(mut self, widget: impl StatusBadge + 'static) -> Self {
        self.status_badge = Some(Box::new(widget));
        self
    }

    pub fn with_percent_text(mut self, widget: impl PercentText + 'static) -> Self {
        self.percent_text = Some(Box::new(widget));
        self
    }

    pub fn apply(&mut self, view: &JobView) {
        if let Some(fill) = self.progress_fill.as_mut() {
            fill.set_fill(view.progress);
            fill.set_value_now(view.progress);
        }
        if let Some(badge) = self.status_badge.as_mut() {
            badge.set_presentation(&view.presentation);
        }
        if let Some(text) = self.percent_text.as_mut() {
            text.set_text(&view.percent_text);
        }
    }
}

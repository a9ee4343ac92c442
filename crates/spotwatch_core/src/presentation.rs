use crate::Status;

/// Badge colour class, icon and label derived from a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationState {
    pub badge_class: &'static str,
    pub icon: &'static str,
    pub label: String,
}

impl PresentationState {
    /// Total over every status; unrecognised values get the in-flight look.
    pub fn for_status(status: &Status) -> Self {
        let (badge_class, icon) = match status {
            Status::Completed => ("bg-success", "fa-check"),
            Status::Failed => ("bg-danger", "fa-times"),
            Status::Cancelled => ("bg-warning", "fa-stop"),
            Status::Pending | Status::Processing | Status::Unknown(_) => {
                ("bg-primary", "fa-spinner fa-spin")
            }
        };
        Self {
            badge_class,
            icon,
            label: status.label(),
        }
    }

    /// Full class list for the badge element.
    pub fn badge_classes(&self) -> String {
        format!("badge fs-6 {}", self.badge_class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Push channel became usable.
    Connected,
    /// Push channel was lost.
    Disconnected,
    /// Progress update for a job, pushed by the server or seeded from a status snapshot.
    JobProgress(crate::ProgressEvent),
    /// The owning view is going away.
    Teardown,
}

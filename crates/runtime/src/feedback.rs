//! Injected feedback capability (haptics, sound).
//!
//! The action layer never talks to a device directly; it is handed a
//! [`FeedbackSink`] at construction and calls it at resolution points.
//! Tests and headless hosts pass [`NoopFeedback`].

/// Capability invoked as combat resolves, for haptics/sound/UI juice.
///
/// All methods default to no-ops so sinks implement only what they care
/// about. Implementations must not block: they run on the session worker.
pub trait FeedbackSink: Send + Sync {
    /// A direct-damage hit landed for `damage`.
    fn on_hit(&self, damage: i32) {
        let _ = damage;
    }

    /// A combatant restored hp.
    fn on_heal(&self) {}

    /// The battle ended in victory.
    fn on_victory(&self) {}

    /// The battle ended in defeat.
    fn on_defeat(&self) {}
}

/// Feedback sink that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFeedback;

impl FeedbackSink for NoopFeedback {}

//! Clock adapter: the controller's view of the external media player.

/// Playback capabilities the sync controller needs from a media player.
///
/// Calls are treated as external and non-transactional: a `seek` or
/// `set_playing` may take effect later, and the player reports what really
/// happened through `Event::Progress`, `Event::Played` and `Event::Paused`.
/// None of these should be called before the player signalled `Event::Ready`.
pub trait ClockAdapter {
    /// Current playback position in milliseconds from media start.
    fn position_ms(&self) -> u64;

    /// Move the playback position. Does not start or stop playback.
    fn seek(&mut self, position_ms: u64);

    /// Start or pause playback.
    fn set_playing(&mut self, playing: bool);
}

/// Connection state of the client session. Texture selection only cares
/// whether a session (live or replayed) is active, but the full set is kept
/// so callers can pass their state through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnState {
    Offline,
    Connecting,
    Loading,
    Online,
    DemoPlayback,
}

impl ConnState {
    /// True while rendering happens against the game map: a live session or
    /// a demo replay. Everything else renders against the menu map.
    #[inline(always)]
    pub fn in_session(self) -> bool {
        matches!(self, ConnState::Online | ConnState::DemoPlayback)
    }
}

/// Metadata of the server the client is (or was last) connected to, as far
/// as ruleset classification needs it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub game_type: String,
}

/// The client session as this module sees it.
pub trait Client {
    fn state(&self) -> ConnState;

    fn server_info(&self) -> ServerInfo;

    /// Whether a seasonal event period is currently active, gating the
    /// seasonal overlay preload.
    fn is_seasonal_time(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_online_and_demo_playback_count_as_in_session() {
        assert!(ConnState::Online.in_session());
        assert!(ConnState::DemoPlayback.in_session());
        assert!(!ConnState::Offline.in_session());
        assert!(!ConnState::Connecting.in_session());
        assert!(!ConnState::Loading.in_session());
    }
}

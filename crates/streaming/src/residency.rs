/// Lifecycle of one texture load.
///
/// Requested → Downloading → Decoding → Resident, with Fallback reachable
/// from any non-terminal state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResidencyState {
    Requested,
    Downloading,
    Decoding,
    Resident,
    Fallback,
}

impl ResidencyState {
    pub fn as_str(self) -> &'static str {
        match self {
            ResidencyState::Requested => "requested",
            ResidencyState::Downloading => "downloading",
            ResidencyState::Decoding => "decoding",
            ResidencyState::Resident => "resident",
            ResidencyState::Fallback => "fallback",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ResidencyState::Resident | ResidencyState::Fallback)
    }
}

impl std::fmt::Display for ResidencyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ResidencyState;

    #[test]
    fn terminal_states() {
        assert!(!ResidencyState::Requested.is_terminal());
        assert!(!ResidencyState::Decoding.is_terminal());
        assert!(ResidencyState::Resident.is_terminal());
        assert!(ResidencyState::Fallback.is_terminal());
        assert_eq!(ResidencyState::Downloading.to_string(), "downloading");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to open audio device: {0}")]
    Device(String),

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error("audio engine is gone")]
    EngineGone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_payload() {
        let err = AudioError::Device("no default output".into());
        assert_eq!(err.to_string(), "failed to open audio device: no default output");
    }
}

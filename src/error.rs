use std::io;
use thiserror::Error;

/// Failures that keep the frame loop from starting
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("arena {width}x{height} is too small to play")]
    ArenaTooSmall { width: u16, height: u16 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SnakeError::SurfaceUnavailable("no 2d context".into());
        assert_eq!(err.to_string(), "drawing surface unavailable: no 2d context");

        let err = SnakeError::ArenaTooSmall { width: 10, height: 4 };
        assert_eq!(err.to_string(), "arena 10x4 is too small to play");

        let err: SnakeError = io::Error::new(io::ErrorKind::Other, "tty gone").into();
        assert_eq!(err.to_string(), "tty gone");
    }
}

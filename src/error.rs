/// Client-side errors: playlist fetches and audio downloads.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_names_the_url() {
        let err = AppError::UnexpectedStatus {
            status: 500,
            url: "http://localhost/api/playlist".into(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("/api/playlist"));
    }
}

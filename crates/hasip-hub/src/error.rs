use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("hub request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed hub response: {0}")]
    MalformedResponse(String),

    #[error("transcoding failed: {0}")]
    Transcode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({endpoint})")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please connect your wallet first!")]
    WalletNotConnected,

    #[error("Only registered sponsors can mint special fish.")]
    NotSponsor,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("Wallet error: {0}")]
    Wallet(String),
}

impl AppError {
    /// Stable machine-readable code, mirrored in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Http(_) => "HTTP_ERROR",
            AppError::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            AppError::InvalidUrl(_) => "INVALID_URL",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::WalletNotConnected => "WALLET_NOT_CONNECTED",
            AppError::NotSponsor => "NOT_SPONSOR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Busy(_) => "BUSY",
            AppError::Wallet(_) => "WALLET_ERROR",
        }
    }

    /// Errors raised before any request is sent; the user can fix these.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::WalletNotConnected
                | AppError::NotSponsor
                | AppError::BadRequest(_)
                | AppError::Busy(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

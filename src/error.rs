use thiserror::Error;

/// Failures talking to the market-data provider.
///
/// An unknown ticker or an empty date range is not an error: the provider
/// returns an empty series and the lookup reports "no data".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid date range: {0}")]
    InvalidDateRange(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ProviderError::Parse(error.to_string())
        } else {
            ProviderError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        ProviderError::Parse(error.to_string())
    }
}

/// Failures loading or running the text-generation model.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model endpoint could not be reached or is not serving the model.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model was reached but did not produce usable text.
    #[error("generation failed: {0}")]
    Generation(String),
}

impl GenerationError {
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, GenerationError::ModelUnavailable(_))
    }
}

/// Rejected operator input. Always recovered by re-prompting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Please enter a valid year.")]
    InvalidYear,

    #[error("Please enter a year between {min} and {max}.")]
    YearOutOfRange { min: i32, max: i32 },

    #[error("Please enter a valid number.")]
    InvalidAmount,

    #[error("Please enter a positive investment amount.")]
    NonPositiveAmount,

    #[error("Please enter a ticker symbol.")]
    EmptyTicker,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Console I/O failures. These end the run instead of re-prompting.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("input closed before all answers were given")]
    InputClosed,

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

/// Why a round could not be fetched. Any of these aborts the whole season.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {season} round {round} failed: {source}")]
    Transport {
        season: u16,
        round: u32,
        source: reqwest::Error,
    },

    #[error("results API returned {status} for {season} round {round}")]
    Status {
        season: u16,
        round: u32,
        status: reqwest::StatusCode,
    },

    #[error("malformed response for {season} round {round}: {reason}")]
    Malformed {
        season: u16,
        round: u32,
        reason: String,
    },
}

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::TeamRecord;

/// Outcome of probing one identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(TeamRecord),
    /// The API answered "no team with this id". A gap is possible, so this is
    /// not proof that the identifier space is exhausted.
    NotFound,
}

#[async_trait]
pub trait Client: Send + Sync {
    async fn fetch_team(&self, id: u32) -> Result<Lookup, FetchError>;
}

use tokio::sync::Mutex;

use crate::{auth::repo_types::User, blog::repo_types::BlogItem, portfolio::repo_types::PortfolioItem};

/// Process-local store used by tests and local runs.
///
/// Each table sits behind its own async mutex. A repository call holds the
/// lock for its whole read-merge-write, which gives the same isolation the
/// Postgres store gets from row locks. Unique columns are checked on every
/// insert and update.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) users: Mutex<Vec<User>>,
    pub(crate) portfolio: Mutex<Vec<PortfolioItem>>,
    pub(crate) blog: Mutex<Vec<BlogItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

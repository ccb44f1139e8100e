//! In-process connection that records SQL and replays canned results.

use std::collections::VecDeque;

use crate::error::{SqlError, SqlResult};

use super::connection::ResultSet;

#[derive(Debug, Default)]
pub struct MockConnection {
    executed: Vec<String>,
    results: VecDeque<ResultSet>,
    affected_rows: usize,
    failure: Option<String>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            affected_rows: 1,
            ..Default::default()
        }
    }

    /// Queue a result for the next query. Queries with nothing queued get
    /// an empty result set.
    pub fn push_result(&mut self, result: ResultSet) -> &mut Self {
        self.results.push_back(result);
        self
    }

    /// Affected-row count reported by every `execute`.
    pub fn set_affected_rows(&mut self, n: usize) -> &mut Self {
        self.affected_rows = n;
        self
    }

    /// Make the next call fail with a database error.
    pub fn fail_next(&mut self, message: impl Into<String>) -> &mut Self {
        self.failure = Some(message.into());
        self
    }

    /// Every statement seen so far, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    pub fn last(&self) -> Option<&str> {
        self.executed.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.executed.clear();
    }

    fn record(&mut self, sql: &str) -> SqlResult<()> {
        tracing::trace!("mock recorded: {}", sql);
        self.executed.push(sql.to_string());
        match self.failure.take() {
            Some(message) => Err(SqlError::Database(message)),
            None => Ok(()),
        }
    }

    pub(crate) fn execute(&mut self, sql: &str) -> SqlResult<usize> {
        self.record(sql)?;
        Ok(self.affected_rows)
    }

    pub(crate) fn query(&mut self, sql: &str) -> SqlResult<ResultSet> {
        self.record(sql)?;
        Ok(self.results.pop_front().unwrap_or_default())
    }
}

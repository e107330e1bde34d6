//! Shell Handlers
//!
//! Executes shell requests against a single owned cache.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::cache::BoundedRecencyCache;
use crate::config::Config;
use crate::shell::requests::Request;
use crate::shell::responses::{
    CleanupResponse, DeleteResponse, ErrorResponse, GetResponse, HasResponse, KeysResponse,
    Response, SetResponse, SizeResponse, StatsResponse,
};

/// A shell session owning one string-keyed cache.
///
/// Requests are handled one at a time, so the session is the single owner
/// the cache requires.
#[derive(Debug)]
pub struct Session {
    cache: BoundedRecencyCache<String, String>,
}

impl Session {
    /// Creates a session around an existing cache.
    pub fn new(cache: BoundedRecencyCache<String, String>) -> Self {
        Self { cache }
    }

    /// Creates a session with a fresh cache built from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(BoundedRecencyCache::from_config(config))
    }

    /// Read access to the underlying cache.
    pub fn cache(&self) -> &BoundedRecencyCache<String, String> {
        &self.cache
    }

    /// Executes one validated request.
    pub fn execute(&mut self, request: Request) -> Response {
        match request {
            Request::Set { key, value } => {
                self.cache.set(key.clone(), value);
                Response::Set(SetResponse {
                    key,
                    size: self.cache.size(),
                })
            }
            Request::Get { key } => {
                let value = self.cache.get(key.as_str()).cloned();
                Response::Get(GetResponse::new(key, value))
            }
            Request::Has { key } => {
                let present = self.cache.has(key.as_str());
                Response::Has(HasResponse { key, present })
            }
            Request::Delete { key } => {
                let deleted = self.cache.delete(key.as_str());
                Response::Delete(DeleteResponse { key, deleted })
            }
            Request::Clear => {
                self.cache.clear();
                self.size_response()
            }
            Request::Size => self.size_response(),
            Request::Keys => Response::Keys(KeysResponse {
                keys: self.cache.keys().cloned().collect(),
            }),
            Request::Cleanup => {
                let discarded = self.cache.cleanup();
                Response::Cleanup(CleanupResponse {
                    discarded,
                    size: self.cache.size(),
                })
            }
            Request::Stats => Response::Stats(StatsResponse::new(self.cache.stats())),
        }
    }

    /// Handles one raw input line.
    ///
    /// Blank lines yield None. Parse and validation failures become error
    /// responses rather than aborting the session.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match Request::parse(line) {
            Ok(request) => {
                debug!(?request, "Executing request");
                self.execute(request)
            }
            Err(e) => {
                debug!(error = %e, "Rejected request");
                Response::Error(ErrorResponse::new(e.to_string()))
            }
        };
        Some(response)
    }

    /// Runs the request loop until `input` is exhausted.
    ///
    /// Writes one JSON response per non-blank input line and returns the
    /// number of responses written.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<usize> {
        info!(capacity = self.cache.capacity(), "Shell session started");

        let mut handled = 0;
        for line in input.lines() {
            let line = line?;
            if let Some(response) = self.handle_line(&line) {
                serde_json::to_writer(&mut output, &response)?;
                writeln!(output)?;
                output.flush()?;
                handled += 1;
            }
        }

        info!(handled, "Shell session finished");
        Ok(handled)
    }

    fn size_response(&self) -> Response {
        Response::Size(SizeResponse {
            size: self.cache.size(),
            capacity: self.cache.capacity(),
        })
    }
}

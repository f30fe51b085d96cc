//! Client matching against the caller's roster.
//!
//! Matching runs in three stages:
//!
//! 1. The first introducer pattern that matches ("pour", "client:", "chez",
//!    "de") yields a candidate name. Later patterns are not tried.
//! 2. The candidate is resolved with [`match_client_by_name`].
//! 3. If stage 1 produced no client, the whole roster is scanned for names
//!    that appear literally in the text.
//!
//! Containment checks run in both directions, so partial names also
//! resolve.

use tracing::{debug, trace};

use super::patterns::{ClientCue, CLIENT_PATTERNS};
use crate::models::client::Client;

/// How a client was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    /// A name introduced by a cue phrase resolved against the roster.
    Cue { cue: ClientCue, name: String },
    /// The full name appears in the text.
    FullName,
    /// The last name appears in the text.
    LastName,
    /// The first name is one of the whitespace-separated words of the text.
    FirstNameToken,
}

/// A roster entry found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMatch<'r> {
    pub client: &'r Client,
    pub strategy: MatchStrategy,
}

/// Finds roster clients referenced in normalized text.
pub struct ClientMatcher<'r> {
    roster: &'r [Client],
    last_name_min_len: usize,
    first_name_min_len: usize,
}

impl<'r> ClientMatcher<'r> {
    /// Create a matcher over a roster. Roster order decides ties.
    pub fn new(roster: &'r [Client]) -> Self {
        Self {
            roster,
            last_name_min_len: 2,
            first_name_min_len: 3,
        }
    }

    /// Set the exclusive minimum name lengths used by the roster scan.
    pub fn with_min_lengths(mut self, last_name: usize, first_name: usize) -> Self {
        self.last_name_min_len = last_name;
        self.first_name_min_len = first_name;
        self
    }

    /// Find the referenced client.
    pub fn find(&self, text: &str) -> Option<&'r Client> {
        self.find_with_strategy(text).map(|m| m.client)
    }

    /// Find the referenced client and report which stage matched.
    pub fn find_with_strategy(&self, text: &str) -> Option<ClientMatch<'r>> {
        if self.roster.is_empty() {
            return None;
        }

        if let Some((cue, name)) = extract_cued_name(text) {
            trace!(cue = cue.as_str(), %name, "cue matched");
            if let Some(client) = match_client_by_name(&name, self.roster) {
                debug!(cue = cue.as_str(), %name, "client resolved from cue");
                return Some(ClientMatch {
                    client,
                    strategy: MatchStrategy::Cue { cue, name },
                });
            }
            debug!(cue = cue.as_str(), %name, "cued name not in roster, scanning roster");
        }

        self.scan_roster(text)
    }

    fn scan_roster(&self, text: &str) -> Option<ClientMatch<'r>> {
        for client in self.roster {
            let full_name = client.full_name_lower();
            let last_name = client.last_name_lower();
            let first_name = client.first_name_lower();

            let strategy = if text.contains(&full_name) {
                MatchStrategy::FullName
            } else if last_name.chars().count() > self.last_name_min_len
                && text.contains(&last_name)
            {
                MatchStrategy::LastName
            } else if first_name.chars().count() > self.first_name_min_len
                && text.split_whitespace().any(|word| word == first_name)
            {
                MatchStrategy::FirstNameToken
            } else {
                continue;
            };

            debug!(?strategy, client = %client.display_name(), "client found by roster scan");
            return Some(ClientMatch { client, strategy });
        }

        None
    }
}

/// Run the cue patterns in priority order and return the first capture,
/// trimmed and lowercased.
fn extract_cued_name(text: &str) -> Option<(ClientCue, String)> {
    CLIENT_PATTERNS.iter().find_map(|(cue, pattern)| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|name| (*cue, name.as_str().trim().to_lowercase()))
    })
}

/// Resolve a lowercased name against the roster. First roster entry wins.
pub fn match_client_by_name<'r>(name: &str, clients: &'r [Client]) -> Option<&'r Client> {
    clients.iter().find(|client| {
        let full_name = client.full_name_lower();
        let last_name = client.last_name_lower();
        let first_name = client.first_name_lower();

        full_name == name
            || last_name == name
            || first_name == name
            || full_name.contains(name)
            || name.contains(&full_name)
            || (!last_name.is_empty() && name.contains(&last_name))
    })
}

/// Find the roster client referenced in normalized text.
pub fn find_client_in_message<'r>(text: &str, clients: &'r [Client]) -> Option<&'r Client> {
    ClientMatcher::new(clients).find(text)
}

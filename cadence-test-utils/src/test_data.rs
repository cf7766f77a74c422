// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

/// Interval used by the reference burst scenario.
pub const SCENARIO_INTERVAL: Duration = Duration::from_millis(100);

/// Payload of a rate-limited search box: the text typed so far.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    pub text: String,
}

pub fn query(text: &str) -> Query {
    Query {
        text: text.to_string(),
    }
}

/// Four triggers 30ms apart carrying A, B, C and D, as (offset in ms, payload).
pub fn burst_scenario() -> Vec<(u64, &'static str)> {
    vec![(0, "A"), (30, "B"), (60, "C"), (90, "D")]
}

/// Successive prefixes of `word`, as typed one keystroke at a time.
pub fn typing(word: &str) -> Vec<Query> {
    word.char_indices()
        .map(|(index, ch)| query(&word[..index + ch.len_utf8()]))
        .collect()
}

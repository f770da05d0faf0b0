use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::OnceCell;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VoteOutcomeKind {
    RecordedFirst,
    RecordedSecond,
    RejectedFinished,
    RejectedDuplicate,
    NoTeam,
}

pub struct Metrics {
    votes_total: HashMap<VoteOutcomeKind, u64>,
    resets_total: u64,
}

static METRICS: OnceCell<Mutex<Metrics>> = OnceCell::new();

fn get() -> &'static Mutex<Metrics> {
    METRICS.get_or_init(|| {
        Mutex::new(Metrics {
            votes_total: HashMap::new(),
            resets_total: 0,
        })
    })
}

pub fn record_vote_outcome(kind: VoteOutcomeKind) {
    let mut m = get().lock().expect("metrics mutex poisoned");
    *m.votes_total.entry(kind).or_insert(0) += 1;
}

pub fn record_reset() {
    let mut m = get().lock().expect("metrics mutex poisoned");
    m.resets_total += 1;
}

pub fn snapshot_as_json() -> serde_json::Value {
    use serde_json::json;
    let m = get().lock().expect("metrics mutex poisoned");

    let votes: Vec<serde_json::Value> = m
        .votes_total
        .iter()
        .map(|(kind, count)| {
            json!({
                "outcome": match kind {
                    VoteOutcomeKind::RecordedFirst => "recorded_first",
                    VoteOutcomeKind::RecordedSecond => "recorded_second",
                    VoteOutcomeKind::RejectedFinished => "rejected_finished",
                    VoteOutcomeKind::RejectedDuplicate => "rejected_duplicate",
                    VoteOutcomeKind::NoTeam => "no_team",
                },
                "count": count
            })
        })
        .collect();

    json!({
        "votes_total": votes,
        "resets_total": m.resets_total,
        "build": {
            "git_hash": env!("YOTE_BUILD_GIT_HASH"),
            "build_time_unix": env!("YOTE_BUILD_TIME_UNIX"),
        }
    })
}

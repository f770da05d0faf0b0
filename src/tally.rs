//! Vote admission and ranking for the yote leaderboard.
//!
//! All state is process-local and lives for the lifetime of the process.
//! Each team keeps two insertion-ordered vote slots: rank-1 (a voter's
//! first accepted vote) and rank-2 (their second, used for tie-breaks).
//! Voter state is derived from two sets: who has cast a first vote, and
//! who has cast both and is finished.

use std::collections::HashSet;

use serde::Serialize;

/// Configured team ids. Order matters twice: it is the substring-match
/// precedence when resolving a team from a link, and the display order
/// for teams with equal counts. Ids must not be substrings of each other.
pub const TEAMS: &[&str] = &["unichance", "textitdone", "goya", "skillmatrix", "weatherselfie"];

/// A single recorded (or attempted) vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub for_choice: &'static str,
    pub by: String,
}

/// What happened to a submitted vote. Rejections are expected policy
/// outcomes, not errors; the attempted vote is carried so callers can
/// echo and log it even when nothing was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// Recorded as the voter's first (rank-1) vote.
    RecordedFirst(Vote),
    /// Recorded as the voter's second (rank-2, tie-break) vote.
    RecordedSecond(Vote),
    /// Voter already cast both votes; nothing recorded.
    RejectedFinished(Vote),
    /// Identical first vote already on record for this team; nothing recorded.
    RejectedDuplicate(Vote),
    /// No configured team matched the target, or no voter was supplied.
    NoTeam,
}

impl CastOutcome {
    /// The vote value to serialize back to the caller, recorded or not.
    pub fn vote(&self) -> Option<&Vote> {
        match self {
            CastOutcome::RecordedFirst(v)
            | CastOutcome::RecordedSecond(v)
            | CastOutcome::RejectedFinished(v)
            | CastOutcome::RejectedDuplicate(v) => Some(v),
            CastOutcome::NoTeam => None,
        }
    }
}

/// Per-team counts for the rendered leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub team: &'static str,
    pub rank1: usize,
    pub rank2: usize,
}

/// Ranked standings plus the derived winner / runner-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub standings: Vec<TeamStanding>,
    pub winner: Option<&'static str>,
    pub runner_up: Option<&'static str>,
}

struct TeamVotes {
    team: &'static str,
    rank1: Vec<Vote>,
    rank2: Vec<Vote>,
}

/// The tally. One instance per process, shared behind a lock; every
/// method runs as a single atomic unit under that lock.
pub struct VoteTally {
    teams: Vec<TeamVotes>,
    has_voted: HashSet<String>,
    finished_voting: HashSet<String>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::with_teams(TEAMS)
    }

    /// Tally over a caller-supplied team list. The list is fixed for the
    /// lifetime of the tally.
    pub fn with_teams(teams: &[&'static str]) -> Self {
        VoteTally {
            teams: teams
                .iter()
                .map(|&team| TeamVotes { team, rank1: Vec::new(), rank2: Vec::new() })
                .collect(),
            has_voted: HashSet::new(),
            finished_voting: HashSet::new(),
        }
    }

    /// Submit a vote. `target` may be an exact team id or any string a
    /// configured id appears in; the first configured id found as a
    /// substring wins, in declared order. The admission policy, in order:
    /// finished voters are rejected; an identical resubmission of an
    /// existing rank-1 vote is rejected (checked before the voted-once
    /// branch, so it is not promoted to a second vote); a voter with one
    /// vote on record gets a rank-2 vote and is finished; otherwise this
    /// is the voter's rank-1 vote.
    pub fn cast_vote(&mut self, voter: &str, target: &str) -> CastOutcome {
        if voter.is_empty() {
            return CastOutcome::NoTeam;
        }
        let Some(idx) = self.teams.iter().position(|t| target.contains(t.team)) else {
            return CastOutcome::NoTeam;
        };

        let vote = Vote { for_choice: self.teams[idx].team, by: voter.to_string() };

        if self.finished_voting.contains(voter) {
            return CastOutcome::RejectedFinished(vote);
        }

        let slot = &mut self.teams[idx];

        if slot.rank1.iter().any(|v| v.by == voter) {
            return CastOutcome::RejectedDuplicate(vote);
        }

        if self.has_voted.contains(voter) {
            slot.rank2.push(vote.clone());
            self.finished_voting.insert(voter.to_string());
            CastOutcome::RecordedSecond(vote)
        } else {
            slot.rank1.push(vote.clone());
            self.has_voted.insert(voter.to_string());
            CastOutcome::RecordedFirst(vote)
        }
    }

    /// Current standings, ordered by descending rank-1 count. The sort
    /// is stable, so teams with equal counts keep declared order.
    ///
    /// Winner/runner-up draw: when the leader's rank-1 count equals the
    /// second team's rank-2 count, the two leading teams are compared on
    /// combined rank-1 + rank-2 and swapped if the second's total is
    /// higher. Only the top two positions are affected. The winner is
    /// position 0 when it has any rank-1 votes; runner-up visibility is
    /// gated on that same count.
    pub fn ranked_results(&self) -> Leaderboard {
        let mut standings: Vec<TeamStanding> = self
            .teams
            .iter()
            .map(|t| TeamStanding { team: t.team, rank1: t.rank1.len(), rank2: t.rank2.len() })
            .collect();
        standings.sort_by(|a, b| b.rank1.cmp(&a.rank1));

        if standings.len() >= 2 && standings[0].rank1 == standings[1].rank2 {
            let first_total = standings[0].rank1 + standings[0].rank2;
            let second_total = standings[1].rank1 + standings[1].rank2;
            if second_total > first_total {
                standings.swap(0, 1);
            }
        }

        let has_leader = standings.first().map(|s| s.rank1 > 0).unwrap_or(false);
        let winner = if has_leader { Some(standings[0].team) } else { None };
        let runner_up = if has_leader && standings.len() >= 2 {
            Some(standings[1].team)
        } else {
            None
        };

        Leaderboard { standings, winner, runner_up }
    }

    /// Clear every team's vote slots and both voter sets.
    pub fn reset(&mut self) {
        for t in &mut self.teams {
            t.rank1.clear();
            t.rank2.clear();
        }
        self.has_voted.clear();
        self.finished_voting.clear();
    }
}

impl Default for VoteTally {
    fn default() -> Self {
        Self::new()
    }
}

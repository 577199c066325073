use super::{AccountId, OptionIndex, Round};
use serde::{Deserialize, Serialize};

/// The global election record.
///
/// Created once by `Create` and never replaced. Only the tally and the
/// retained-vote counter change afterwards.
///
/// # Example
///
/// ```rust
/// use electorate::model::{AccountId, Election};
///
/// let creator = AccountId::new([1; 32]);
/// let election = Election::new(creator, 100, vec!["A".into(), "B".into()]);
///
/// assert_eq!(election.num_options(), 2);
/// assert_eq!(election.tally(), &[0, 0]);
/// assert!(election.is_open(100));
/// assert!(!election.is_open(101));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    creator: AccountId,
    election_end: Round,
    option_labels: Vec<String>,
    tally: Vec<u64>,
    /// Votes still counted whose voter record was cleared after the end.
    #[serde(default)]
    retained_votes: u64,
}

/// One row of the public results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionResult {
    pub index: OptionIndex,
    pub label: String,
    pub votes: u64,
}

impl Election {
    /// New election with every tally at zero.
    pub fn new(creator: AccountId, election_end: Round, option_labels: Vec<String>) -> Self {
        let tally = vec![0; option_labels.len()];
        Self {
            creator,
            election_end,
            option_labels,
            tally,
            retained_votes: 0,
        }
    }

    pub fn creator(&self) -> &AccountId {
        &self.creator
    }

    pub fn election_end(&self) -> Round {
        self.election_end
    }

    pub fn num_options(&self) -> u32 {
        self.option_labels.len() as u32
    }

    pub fn option_labels(&self) -> &[String] {
        &self.option_labels
    }

    pub fn tally(&self) -> &[u64] {
        &self.tally
    }

    pub fn retained_votes(&self) -> u64 {
        self.retained_votes
    }

    /// Registration, status decisions and vote changes are allowed while
    /// `round <= election_end`.
    pub fn is_open(&self, round: Round) -> bool {
        round <= self.election_end
    }

    pub fn contains_option(&self, option: OptionIndex) -> bool {
        (option as usize) < self.tally.len()
    }

    pub fn votes_for(&self, option: OptionIndex) -> Option<u64> {
        self.tally.get(option as usize).copied()
    }

    pub fn total_votes(&self) -> u64 {
        self.tally.iter().sum()
    }

    /// Per-option results in option order.
    pub fn results(&self) -> Vec<OptionResult> {
        self.option_labels
            .iter()
            .zip(&self.tally)
            .enumerate()
            .map(|(index, (label, votes))| OptionResult {
                index: index as OptionIndex,
                label: label.clone(),
                votes: *votes,
            })
            .collect()
    }

    /// Option with the most votes; ties go to the lowest index.
    ///
    /// Returns `None` while no vote is counted.
    pub fn leader(&self) -> Option<OptionResult> {
        let mut best: Option<OptionResult> = None;
        for row in self.results() {
            if row.votes == 0 {
                continue;
            }
            match &best {
                Some(current) if current.votes >= row.votes => {}
                _ => best = Some(row),
            }
        }
        best
    }

    pub(crate) fn set_tally(&mut self, option: OptionIndex, votes: u64) -> bool {
        match self.tally.get_mut(option as usize) {
            Some(slot) => {
                *slot = votes;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_retained_votes(&mut self, votes: u64) {
        self.retained_votes = votes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn election() -> Election {
        Election::new(
            AccountId::new([9; 32]),
            50,
            vec!["A".into(), "B".into(), "C".into()],
        )
    }

    #[test]
    fn new_election_starts_at_zero() {
        let election = election();
        assert_eq!(election.tally(), &[0, 0, 0]);
        assert_eq!(election.total_votes(), 0);
        assert_eq!(election.retained_votes(), 0);
        assert_eq!(election.creator(), &AccountId::new([9; 32]));
    }

    #[test]
    fn deadline_is_inclusive() {
        let election = election();
        assert!(election.is_open(0));
        assert!(election.is_open(50));
        assert!(!election.is_open(51));
    }

    #[test]
    fn option_bounds() {
        let election = election();
        assert!(election.contains_option(0));
        assert!(election.contains_option(2));
        assert!(!election.contains_option(3));
        assert_eq!(election.votes_for(3), None);
    }

    #[test]
    fn set_tally_rejects_unknown_option() {
        let mut election = election();
        assert!(election.set_tally(1, 4));
        assert!(!election.set_tally(7, 4));
        assert_eq!(election.tally(), &[0, 4, 0]);
    }

    #[test]
    fn leader_prefers_lowest_index_on_tie() {
        let mut election = election();
        assert_eq!(election.leader(), None);

        election.set_tally(1, 3);
        election.set_tally(2, 3);
        let leader = election.leader().unwrap();
        assert_eq!(leader.index, 1);
        assert_eq!(leader.label, "B");

        election.set_tally(2, 4);
        assert_eq!(election.leader().unwrap().index, 2);
    }

    #[test]
    fn results_follow_option_order() {
        let mut election = election();
        election.set_tally(0, 2);
        let labels: Vec<_> = election.results().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(election.results()[0].votes, 2);
    }

    #[test]
    fn retained_votes_default_when_missing() {
        let creator = vec![9u8; 32];
        let json = serde_json::json!({
            "creator": creator,
            "election_end": 50,
            "option_labels": ["A"],
            "tally": [0],
        });
        let election: Election = serde_json::from_value(json).unwrap();
        assert_eq!(election.retained_votes(), 0);
    }
}

use crate::model::{AccountId, Election, OptionIndex, VoterRecord};
use serde::{Deserialize, Serialize};

/// A single state write produced by an accepted operation.
///
/// Values are absolute (the new tally, the new record) so applying a batch
/// never depends on anything but the batch itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    CreateElection(Election),
    SetTally { option: OptionIndex, votes: u64 },
    SetRetainedVotes(u64),
    PutVoter { account: AccountId, record: VoterRecord },
    RemoveVoter { account: AccountId },
}

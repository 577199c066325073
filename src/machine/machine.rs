//! The election decision procedure.

use crate::config::{DeadlineMode, MachineConfig};
use crate::core::{Guard, State, VoterStatus};
use crate::error::ElectionError;
use crate::machine::codec::Invocation;
use crate::machine::mutation::Mutation;
use crate::machine::operation::{CreateParams, Operation};
use crate::model::{AccountId, Election, Round, VoterRecord};
use crate::rules::ParamRules;
use crate::store::{IdentityContext, StateView};
use stillwater::validation::Validation;
use tracing::debug;

/// Result of evaluating one operation: the writes to commit, or why not.
pub type Decision = Result<Vec<Mutation>, ElectionError>;

/// Identity of one call, resolved against current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    caller: AccountId,
    round: Round,
    creator: Option<AccountId>,
}

impl CallContext {
    pub fn new(caller: AccountId, round: Round, creator: Option<AccountId>) -> Self {
        Self {
            caller,
            round,
            creator,
        }
    }

    /// Resolve the creator from the stored election, if any.
    pub fn resolve<V: StateView>(caller: AccountId, round: Round, state: &V) -> Self {
        let creator = state.election().map(|e| *e.creator());
        Self::new(caller, round, creator)
    }
}

impl IdentityContext for CallContext {
    fn caller_account(&self) -> &AccountId {
        &self.caller
    }

    fn creator_account(&self) -> Option<&AccountId> {
        self.creator.as_ref()
    }

    fn current_round(&self) -> Round {
        self.round
    }
}

/// Pure decision logic for every election operation.
///
/// Each entry point reads the state it needs, checks every precondition and
/// only then builds its mutations, so a rejection never carries partial
/// writes. The machine holds no mutable state of its own.
///
/// # Example
///
/// ```rust
/// use electorate::config::MachineConfig;
/// use electorate::machine::{CallContext, CreateParams, ElectionStateMachine, Operation};
/// use electorate::model::AccountId;
/// use electorate::store::{MemoryStore, StateStore, StateView};
///
/// let machine = ElectionStateMachine::new(MachineConfig::default());
/// let mut store = MemoryStore::new();
/// let creator = AccountId::new([1; 32]);
///
/// let create = Operation::Create(CreateParams {
///     end: 100,
///     num_options: 2,
///     option_labels: vec!["A".into(), "B".into()],
/// });
/// let ctx = CallContext::resolve(creator, 10, &store);
/// let mutations = machine.execute(&ctx, &create, &store).unwrap();
/// store.commit(&mutations).unwrap();
///
/// assert_eq!(store.election().unwrap().tally(), &[0, 0]);
/// ```
pub struct ElectionStateMachine {
    config: MachineConfig,
    rules: ParamRules,
    decision_guard: Guard<VoterStatus>,
    ballot_guard: Guard<VoterStatus>,
}

impl ElectionStateMachine {
    pub fn new(config: MachineConfig) -> Self {
        let rules = ParamRules::from_config(&config);
        Self::with_rules(config, rules)
    }

    /// Use custom creation rules instead of the ones derived from `config`.
    pub fn with_rules(config: MachineConfig, rules: ParamRules) -> Self {
        Self {
            config,
            rules,
            decision_guard: Guard::exactly("pending", VoterStatus::Pending),
            ballot_guard: Guard::exactly("approved", VoterStatus::Approved),
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Decode a raw invocation and evaluate it.
    pub fn dispatch<V: StateView>(&self, invocation: &Invocation, state: &V) -> Decision {
        let operation = invocation.decode()?;
        let ctx = CallContext::resolve(invocation.caller, invocation.round, state);
        self.execute(&ctx, &operation, state)
    }

    /// Evaluate one typed operation.
    pub fn execute<C, V>(&self, ctx: &C, operation: &Operation, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        match operation {
            Operation::Create(params) => self.create(ctx, params, state),
            Operation::Register => self.register(ctx, state),
            Operation::UpdateVoterStatus { target, status } => {
                self.update_voter_status(ctx, target, *status, state)
            }
            Operation::Vote { option } => self.vote(ctx, *option, state),
            Operation::CloseOut => self.close_out(ctx, state),
            Operation::ClearState => self.clear_state(ctx, state),
            Operation::Delete => self.authorize_admin(ctx, "delete the election", state),
            Operation::Update => self.authorize_admin(ctx, "update the election", state),
        }
    }

    pub fn create<C, V>(&self, ctx: &C, params: &CreateParams, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        if state.election().is_some() {
            return Err(ElectionError::AlreadyCreated);
        }

        if let Validation::Failure(errors) = self.rules.enforce(params) {
            return Err(ElectionError::InvalidParameters {
                violations: errors.iter().cloned().collect(),
            });
        }

        let round = ctx.current_round();
        let election_end = match self.config.deadline {
            DeadlineMode::Absolute => params.end,
            DeadlineMode::Relative => {
                round
                    .checked_add(params.end)
                    .ok_or(ElectionError::DeadlineOverflow {
                        round,
                        duration: params.end,
                    })?
            }
        };

        let election = Election::new(
            *ctx.caller_account(),
            election_end,
            params.option_labels.clone(),
        );
        debug!(
            creator = %ctx.caller_account(),
            round,
            election_end,
            options = election.num_options(),
            "election created"
        );
        Ok(vec![Mutation::CreateElection(election)])
    }

    pub fn register<C, V>(&self, ctx: &C, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        let election = require_election(state)?;
        require_open(&election, ctx.current_round())?;

        let caller = ctx.caller_account();
        if state.voter(caller).is_some() {
            return Err(ElectionError::AlreadyRegistered);
        }

        debug!(caller = %caller, round = ctx.current_round(), "voter registered");
        Ok(vec![Mutation::PutVoter {
            account: *caller,
            record: VoterRecord::registered(),
        }])
    }

    pub fn update_voter_status<C, V>(
        &self,
        ctx: &C,
        target: &AccountId,
        status: VoterStatus,
        state: &V,
    ) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        let election = require_election(state)?;
        // Checked before the target is read so outsiders learn nothing about it.
        if ctx.caller_account() != election.creator() {
            return Err(ElectionError::NotCreator {
                action: "update voter status",
            });
        }
        require_open(&election, ctx.current_round())?;

        if !status.is_decision() {
            return Err(ElectionError::InvalidStatus(status.as_wire().to_string()));
        }

        let record = state
            .voter(target)
            .ok_or(ElectionError::TargetNotRegistered)?;
        if !self.decision_guard.check(&record.status) {
            return Err(ElectionError::StatusAlreadyDecided);
        }

        debug!(
            target = %target,
            from = record.status.name(),
            to = status.name(),
            round = ctx.current_round(),
            "voter status decided"
        );
        Ok(vec![Mutation::PutVoter {
            account: *target,
            record: record.with_status(status),
        }])
    }

    pub fn vote<C, V>(&self, ctx: &C, option: u64, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        let election = require_election(state)?;
        require_open(&election, ctx.current_round())?;

        let caller = ctx.caller_account();
        let record = state.voter(caller).ok_or(ElectionError::NotRegistered)?;
        if !self.ballot_guard.check(&record.status) {
            return Err(if record.status.is_error() {
                ElectionError::NotEligible
            } else {
                ElectionError::AwaitingApproval
            });
        }
        if record.has_voted() {
            return Err(ElectionError::AlreadyVoted);
        }

        let index = u32::try_from(option)
            .ok()
            .filter(|i| election.contains_option(*i))
            .ok_or(ElectionError::OptionOutOfRange {
                option,
                num_options: election.num_options(),
            })?;
        let votes = election.votes_for(index).unwrap_or(0) + 1;

        debug!(caller = %caller, option = index, votes, "vote counted");
        Ok(vec![
            Mutation::SetTally {
                option: index,
                votes,
            },
            Mutation::PutVoter {
                account: *caller,
                record: record.with_vote(index),
            },
        ])
    }

    /// Withdraw participation. Always accepted.
    pub fn close_out<C, V>(&self, ctx: &C, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        let caller = ctx.caller_account();
        let (Some(election), Some(record)) = (state.election(), state.voter(caller)) else {
            return Ok(Vec::new());
        };

        let mut mutations = Vec::new();
        if let Some(retract) = retract_vote(&election, &record, ctx.current_round()) {
            mutations.push(retract);
            mutations.push(Mutation::PutVoter {
                account: *caller,
                record: record.without_vote(),
            });
        }

        debug!(
            caller = %caller,
            round = ctx.current_round(),
            retracted = !mutations.is_empty(),
            "close out"
        );
        Ok(mutations)
    }

    /// Remove the caller's record. Always accepted; only the tally
    /// adjustment depends on the deadline.
    pub fn clear_state<C, V>(&self, ctx: &C, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        let caller = ctx.caller_account();
        let Some(record) = state.voter(caller) else {
            return Ok(Vec::new());
        };

        let mut mutations = Vec::new();
        if let Some(election) = state.election() {
            match retract_vote(&election, &record, ctx.current_round()) {
                Some(retract) => mutations.push(retract),
                // The vote is final; keep counting it after the record is gone.
                None if record.has_voted() => {
                    mutations.push(Mutation::SetRetainedVotes(election.retained_votes() + 1))
                }
                None => {}
            }
        }
        mutations.push(Mutation::RemoveVoter { account: *caller });

        debug!(caller = %caller, round = ctx.current_round(), "state cleared");
        Ok(mutations)
    }

    /// Gate for delete/update of the deployed logic. Produces no writes.
    pub fn authorize_admin<C, V>(&self, ctx: &C, action: &'static str, state: &V) -> Decision
    where
        C: IdentityContext,
        V: StateView,
    {
        require_election(state)?;
        match ctx.creator_account() {
            Some(creator) if creator == ctx.caller_account() => {
                debug!(caller = %creator, action, "admin operation authorized");
                Ok(Vec::new())
            }
            _ => Err(ElectionError::NotCreator { action }),
        }
    }
}

fn require_election<V: StateView>(state: &V) -> Result<Election, ElectionError> {
    state.election().ok_or(ElectionError::NotCreated)
}

fn require_open(election: &Election, round: Round) -> Result<(), ElectionError> {
    if !election.is_open(round) {
        return Err(ElectionError::ElectionClosed {
            round,
            election_end: election.election_end(),
        });
    }
    Ok(())
}

/// Tally write that takes back `record`'s vote, if it may still be withdrawn.
fn retract_vote(election: &Election, record: &VoterRecord, round: Round) -> Option<Mutation> {
    let option = record.voted_option?;
    if !election.is_open(round) {
        return None;
    }
    let votes = election.votes_for(option)?.saturating_sub(1);
    Some(Mutation::SetTally { option, votes })
}

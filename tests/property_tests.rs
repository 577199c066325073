//! Property-based tests for the election machine.
//!
//! These tests use proptest to drive random operation sequences through the
//! ledger and check the election invariants after every step.

use electorate::config::MachineConfig;
use electorate::core::{Guard, State, VoterStatus};
use electorate::ledger::Ledger;
use electorate::machine::{CreateParams, Operation};
use electorate::model::{AccountId, Round};
use electorate::store::{MemoryStore, StateView};
use proptest::prelude::*;

const END: Round = 100;

fn account(index: u8) -> AccountId {
    AccountId::new([index + 1; 32])
}

fn creator() -> AccountId {
    account(0)
}

#[derive(Clone, Debug)]
struct Step {
    caller: AccountId,
    advance: Round,
    operation: Operation,
}

prop_compose! {
    fn arbitrary_status()(variant in 0..3u8) -> VoterStatus {
        match variant {
            0 => VoterStatus::Pending,
            1 => VoterStatus::Approved,
            _ => VoterStatus::Denied,
        }
    }
}

fn arbitrary_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => Just(Operation::Register),
        3 => (0..4u8, arbitrary_status())
            .prop_map(|(t, status)| Operation::UpdateVoterStatus { target: account(t), status }),
        4 => (0..4u64).prop_map(|option| Operation::Vote { option }),
        2 => Just(Operation::CloseOut),
        2 => Just(Operation::ClearState),
        1 => Just(Operation::Delete),
        1 => Just(Operation::Create(CreateParams {
            end: END,
            num_options: 2,
            option_labels: vec!["X".into(), "Y".into()],
        })),
    ]
}

prop_compose! {
    fn arbitrary_step()(
        caller in 0..4u8,
        admin in any::<bool>(),
        advance in 0..12u64,
        operation in arbitrary_operation(),
    ) -> Step {
        // Bias status updates toward the creator so approvals actually happen.
        let caller = match operation {
            Operation::UpdateVoterStatus { .. } if admin => creator(),
            _ => account(caller),
        };
        Step { caller, advance, operation }
    }
}

fn created_ledger() -> Ledger {
    let mut ledger = Ledger::in_memory(MachineConfig::default());
    let create = Operation::Create(CreateParams {
        end: END,
        num_options: 3,
        option_labels: vec!["A".into(), "B".into(), "C".into()],
    });
    ledger
        .submit_operation(creator(), 0, &create)
        .unwrap()
        .unwrap();
    ledger
}

fn assert_tally_consistent(store: &MemoryStore) -> Result<(), TestCaseError> {
    let election = store.election().unwrap();
    prop_assert_eq!(
        election.total_votes(),
        store.recorded_votes() + election.retained_votes()
    );
    for (option, counted) in election.tally().iter().enumerate() {
        let held = store
            .voters()
            .filter(|(_, r)| r.voted_option == Some(option as u32))
            .count() as u64;
        prop_assert!(*counted >= held);
    }
    Ok(())
}

proptest! {
    #[test]
    fn guard_is_deterministic(state in arbitrary_status()) {
        let guard = Guard::new("open", |s: &VoterStatus| !s.is_final());
        prop_assert_eq!(guard.check(&state), guard.check(&state));
    }

    #[test]
    fn only_pending_is_undecided(state in arbitrary_status()) {
        prop_assert_eq!(state.is_final(), state != VoterStatus::Pending);
        prop_assert_eq!(VoterStatus::from_wire(state.as_wire().as_bytes()), Some(state));
    }

    #[test]
    fn invariants_hold_over_random_sequences(
        steps in prop::collection::vec(arbitrary_step(), 1..60)
    ) {
        let mut ledger = created_ledger();
        let mut round: Round = 1;

        for step in steps {
            round += step.advance;
            let before = ledger.store().clone();
            let tally_before = before.election().unwrap().tally().to_vec();
            let caller_before = before.voter(&step.caller);

            let result = ledger
                .submit_operation(step.caller, round, &step.operation)
                .unwrap();
            let after = ledger.store();

            if result.is_err() {
                prop_assert_eq!(after, &before);
            }

            match &step.operation {
                Operation::Register if result.is_ok() => {
                    prop_assert_eq!(caller_before, None);
                    prop_assert_eq!(
                        after.voter(&step.caller).map(|r| r.status),
                        Some(VoterStatus::Pending)
                    );
                }
                Operation::Vote { option } => {
                    if round > END {
                        prop_assert!(result.is_err());
                    }
                    if result.is_ok() {
                        let prior = caller_before.unwrap();
                        prop_assert_eq!(prior.status, VoterStatus::Approved);
                        prop_assert_eq!(prior.voted_option, None);
                        let index = *option as usize;
                        let tally = after.election().unwrap().tally().to_vec();
                        prop_assert_eq!(tally[index], tally_before[index] + 1);
                    }
                }
                Operation::UpdateVoterStatus { target, .. } if result.is_ok() => {
                    prop_assert_eq!(step.caller, creator());
                    prop_assert_eq!(
                        before.voter(target).map(|r| r.status),
                        Some(VoterStatus::Pending)
                    );
                }
                Operation::CloseOut | Operation::ClearState => {
                    prop_assert!(result.is_ok());
                    let tally = after.election().unwrap().tally().to_vec();
                    match caller_before.and_then(|r| r.voted_option) {
                        Some(k) if round <= END => {
                            let k = k as usize;
                            prop_assert_eq!(tally[k] + 1, tally_before[k]);
                        }
                        _ => prop_assert_eq!(&tally, &tally_before),
                    }
                    if let Some(record) = after.voter(&step.caller) {
                        if round <= END {
                            prop_assert_eq!(record.voted_option, None);
                        }
                    }
                }
                Operation::Create(_) => prop_assert!(result.is_err()),
                _ => {}
            }

            assert_tally_consistent(after)?;
        }
    }

    #[test]
    fn repeated_close_out_is_inert(option in 0..3u64, extra in 1..5usize) {
        let mut ledger = created_ledger();
        let voter = account(1);
        for (round, caller, op) in [
            (1, voter, Operation::Register),
            (2, creator(), Operation::UpdateVoterStatus {
                target: voter,
                status: VoterStatus::Approved,
            }),
            (3, voter, Operation::Vote { option }),
            (4, voter, Operation::CloseOut),
        ] {
            ledger.submit_operation(caller, round, &op).unwrap().unwrap();
        }

        for i in 0..extra {
            ledger
                .submit_operation(voter, 5 + i as Round, &Operation::CloseOut)
                .unwrap()
                .unwrap();
        }

        prop_assert_eq!(ledger.store().election().unwrap().total_votes(), 0);
    }

    #[test]
    fn replicas_agree(steps in prop::collection::vec(arbitrary_step(), 1..40)) {
        let mut first = created_ledger();
        let mut second = created_ledger();
        let mut round: Round = 1;

        for step in steps {
            round += step.advance;
            let a = first.submit_operation(step.caller, round, &step.operation).unwrap();
            let b = second.submit_operation(step.caller, round, &step.operation).unwrap();
            prop_assert_eq!(a, b);
        }

        prop_assert_eq!(first.store(), second.store());
    }
}

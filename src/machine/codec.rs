//! Raw invocation boundary.
//!
//! The ledger hands the machine an [`Invocation`]: caller, round, the
//! transaction's completion kind and the raw application arguments. This
//! module turns that into exactly one [`Operation`] or rejects it.
//!
//! Argument layout:
//!
//! | completion | args |
//! |------------|------|
//! | `Create`   | `[end: u64, num_options: u64, labels: "A,B,C"]` |
//! | `NoOp`     | `["vote", option: u64]` |
//! | `NoOp`     | `["update_user_status", account: 32 bytes, "yes" \| "no"]` |
//!
//! Integers are big-endian, 1 to 8 bytes. Every other completion carries no
//! arguments the machine reads.

use crate::core::VoterStatus;
use crate::error::ElectionError;
use crate::machine::operation::{CreateParams, Operation};
use crate::model::{AccountId, Round};
use serde::{Deserialize, Serialize};

pub const VOTE_TAG: &[u8] = b"vote";
pub const UPDATE_STATUS_TAG: &[u8] = b"update_user_status";
pub const LABEL_SEPARATOR: char = ',';

/// Lifecycle intent declared by the transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Completion {
    /// First call against a not-yet-existing application.
    Create,
    NoOp,
    OptIn,
    CloseOut,
    ClearState,
    Update,
    Delete,
}

/// One call as delivered by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub caller: AccountId,
    pub round: Round,
    pub completion: Completion,
    pub args: Vec<Vec<u8>>,
}

impl Invocation {
    pub fn new(caller: AccountId, round: Round, completion: Completion) -> Self {
        Self {
            caller,
            round,
            completion,
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<Vec<u8>>) -> Self {
        self.args = args;
        self
    }

    /// Encode a typed operation the way a client would submit it.
    pub fn from_operation(caller: AccountId, round: Round, operation: &Operation) -> Self {
        let (completion, args) = match operation {
            Operation::Create(params) => (
                Completion::Create,
                vec![
                    encode_u64(params.end),
                    encode_u64(params.num_options),
                    encode_labels(&params.option_labels),
                ],
            ),
            Operation::Register => (Completion::OptIn, Vec::new()),
            Operation::UpdateVoterStatus { target, status } => (
                Completion::NoOp,
                vec![
                    UPDATE_STATUS_TAG.to_vec(),
                    target.as_bytes().to_vec(),
                    status.as_wire().as_bytes().to_vec(),
                ],
            ),
            Operation::Vote { option } => {
                (Completion::NoOp, vec![VOTE_TAG.to_vec(), encode_u64(*option)])
            }
            Operation::CloseOut => (Completion::CloseOut, Vec::new()),
            Operation::ClearState => (Completion::ClearState, Vec::new()),
            Operation::Delete => (Completion::Delete, Vec::new()),
            Operation::Update => (Completion::Update, Vec::new()),
        };
        Self {
            caller,
            round,
            completion,
            args,
        }
    }

    /// Select the single operation this invocation names.
    pub fn decode(&self) -> Result<Operation, ElectionError> {
        match self.completion {
            Completion::Create => decode_create(&self.args),
            Completion::Delete => Ok(Operation::Delete),
            Completion::Update => Ok(Operation::Update),
            Completion::CloseOut => Ok(Operation::CloseOut),
            Completion::ClearState => Ok(Operation::ClearState),
            Completion::OptIn => Ok(Operation::Register),
            Completion::NoOp => decode_named(&self.args),
        }
    }
}

pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn encode_labels(labels: &[String]) -> Vec<u8> {
    labels.join(&LABEL_SEPARATOR.to_string()).into_bytes()
}

fn decode_create(args: &[Vec<u8>]) -> Result<Operation, ElectionError> {
    expect_args("create", args, 3)?;
    Ok(Operation::Create(CreateParams {
        end: decode_u64(0, &args[0])?,
        num_options: decode_u64(1, &args[1])?,
        option_labels: decode_labels(2, &args[2])?,
    }))
}

fn decode_named(args: &[Vec<u8>]) -> Result<Operation, ElectionError> {
    let Some(tag) = args.first() else {
        return Err(ElectionError::UnrecognizedAction { tag: String::new() });
    };

    match tag.as_slice() {
        VOTE_TAG => {
            expect_args("vote", args, 2)?;
            Ok(Operation::Vote {
                option: decode_u64(1, &args[1])?,
            })
        }
        UPDATE_STATUS_TAG => {
            expect_args("update_user_status", args, 3)?;
            let target =
                AccountId::from_slice(&args[1]).ok_or_else(|| ElectionError::MalformedArgument {
                    position: 1,
                    reason: format!("expected a 32-byte account, got {} bytes", args[1].len()),
                })?;
            let status = VoterStatus::from_wire(&args[2]).ok_or_else(|| {
                ElectionError::InvalidStatus(String::from_utf8_lossy(&args[2]).into_owned())
            })?;
            Ok(Operation::UpdateVoterStatus { target, status })
        }
        other => Err(ElectionError::UnrecognizedAction {
            tag: String::from_utf8_lossy(other).into_owned(),
        }),
    }
}

fn expect_args(
    operation: &'static str,
    args: &[Vec<u8>],
    expected: usize,
) -> Result<(), ElectionError> {
    if args.len() != expected {
        return Err(ElectionError::WrongArgumentCount {
            operation,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn decode_u64(position: usize, raw: &[u8]) -> Result<u64, ElectionError> {
    if raw.is_empty() || raw.len() > 8 {
        return Err(ElectionError::MalformedArgument {
            position,
            reason: format!("expected a 1-8 byte integer, got {} bytes", raw.len()),
        });
    }
    Ok(raw
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
}

fn decode_labels(position: usize, raw: &[u8]) -> Result<Vec<String>, ElectionError> {
    let text = std::str::from_utf8(raw).map_err(|e| ElectionError::MalformedArgument {
        position,
        reason: format!("labels are not utf-8: {}", e),
    })?;
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(text.split(LABEL_SEPARATOR).map(str::to_string).collect())
}

use serde::{Deserialize, Serialize};

use ledger_core::AccountId;

use crate::Event;

/// Envelope for an event, carrying the stream metadata of the account it belongs to.
///
/// `sequence_number` is 1-based and monotonically increasing per account.
/// `event_type` and `version` are copied from the payload so consumers can
/// dispatch without decoding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    account_id: AccountId,
    sequence_number: u64,
    event_type: String,
    version: u32,
    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    pub fn new(account_id: AccountId, sequence_number: u64, payload: E) -> Self {
        Self {
            account_id,
            sequence_number,
            event_type: payload.event_type().to_string(),
            version: payload.version(),
            payload,
        }
    }

    /// Wrap an ordered stream of events, numbering them from 1.
    pub fn wrap_all<'a, I>(account_id: AccountId, events: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a E>,
    {
        events
            .into_iter()
            .zip(1u64..)
            .map(|(event, seq)| Self::new(account_id, seq, event.clone()))
            .collect()
    }
}

impl<E> EventEnvelope<E> {
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}

// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery receipts.

use wabridge_core::raw::{ReceiptEvent, ReceiptType};
use wabridge_core::types::{Contact, Message, MessageStatus};

/// The records a receipt produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptOutcome {
    /// One status update per acknowledged message id.
    Statuses(Vec<Message>),
    /// The chat went inactive.
    Inactive(Contact),
    /// A receipt type with no mapping.
    Unrecognized(ReceiptType),
}

pub fn receipt(evt: &ReceiptEvent) -> ReceiptOutcome {
    let status = match &evt.receipt_type {
        ReceiptType::Sender => MessageStatus::Sent,
        ReceiptType::Delivered => MessageStatus::Delivered,
        ReceiptType::Read | ReceiptType::ReadSelf | ReceiptType::Played => MessageStatus::Read,
        ReceiptType::ServerError => MessageStatus::ServerError,
        ReceiptType::Inactive => {
            return ReceiptOutcome::Inactive(Contact {
                available: Some(false),
                ..Contact::new(evt.source.chat.to_string())
            });
        }
        other => return ReceiptOutcome::Unrecognized(other.clone()),
    };

    let chat = evt.source.chat.to_string();
    ReceiptOutcome::Statuses(
        evt.message_ids
            .iter()
            .map(|id| Message {
                status: Some(status),
                ..Message::keyed(id.clone(), chat.clone())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(receipt_type: &str) -> ReceiptEvent {
        serde_json::from_value(json!({
            "Chat": "1@s.whatsapp.net",
            "Sender": "2@s.whatsapp.net",
            "MessageIDs": ["A", "B"],
            "Timestamp": "2025-05-02T11:13:28Z",
            "Type": receipt_type
        }))
        .unwrap()
    }

    #[test]
    fn one_status_per_message_id() {
        let ReceiptOutcome::Statuses(messages) = receipt(&event("read")) else {
            panic!("expected statuses");
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_id, "A");
        assert_eq!(messages[1].chat_jid, "1@s.whatsapp.net");
        assert!(messages.iter().all(|m| m.status == Some(MessageStatus::Read)));
        assert!(messages.iter().all(|m| m.timestamp.is_none()));
    }

    #[test]
    fn receipt_types_map_to_key_and_status_only() {
        for (wire, status) in [
            ("sender", MessageStatus::Sent),
            ("", MessageStatus::Delivered),
            ("read", MessageStatus::Read),
            ("played", MessageStatus::Read),
            ("read-self", MessageStatus::Read),
            ("server-error", MessageStatus::ServerError),
        ] {
            let ReceiptOutcome::Statuses(messages) = receipt(&event(wire)) else {
                panic!("{wire:?}: expected statuses");
            };
            let expected: Vec<Message> = ["A", "B"]
                .into_iter()
                .map(|id| Message {
                    status: Some(status),
                    ..Message::keyed(id, "1@s.whatsapp.net")
                })
                .collect();
            assert_eq!(messages, expected, "receipt type {wire:?}");
            assert!(
                messages.iter().all(|m| m.timestamp.is_none() && m.sender_jid.is_none()),
                "receipt type {wire:?}"
            );
        }
    }

    #[test]
    fn inactive_marks_chat_unavailable() {
        let ReceiptOutcome::Inactive(contact) = receipt(&event("inactive")) else {
            panic!("expected contact");
        };
        assert_eq!(
            contact,
            Contact {
                available: Some(false),
                ..Contact::new("1@s.whatsapp.net")
            }
        );
    }

    #[test]
    fn retry_is_unrecognized() {
        assert_eq!(
            receipt(&event("retry")),
            ReceiptOutcome::Unrecognized(ReceiptType::Retry)
        );
    }
}

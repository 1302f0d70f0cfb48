// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History sync conversations as contacts.

use wabridge_core::raw::Conversation;
use wabridge_core::raw::history::{HistoryParticipant, HistoryRank};
use wabridge_core::types::{Contact, Group, GroupParticipant, ParticipantRank};

/// The contact for one synced conversation, or `None` when it has no id.
///
/// The conversation name fills both the push name and the group name; the
/// consumer keeps whichever applies to the kind of chat.
pub fn conversation_contact(conv: &Conversation) -> Option<Contact> {
    let id = conv.id.as_ref()?;

    let muted = conv.mute_end_time.map(|end| i64::try_from(end).unwrap_or(i64::MAX));

    Some(Contact {
        push_name: conv.name.clone(),
        display_name: conv.display_name.clone(),
        username: conv.username.clone(),
        archived: conv.archived,
        pinned: conv.pinned.map(|at| at != 0),
        muted: muted.map(|end| end > 0),
        mute_end_timestamp: muted,
        group: Group {
            group_name: conv.name.clone(),
            group_topic: conv.description.clone(),
            group_info_locked_to_admins: conv.locked,
            group_is_parent: conv.is_parent_group,
            group_linked_parent_jid: conv.parent_group_id.clone(),
            group_is_default_sub_group: conv.is_default_subgroup,
            group_replace_participants: conv.participant.iter().map(participant).collect(),
            ..Group::default()
        },
        ..Contact::new(id.clone())
    })
}

fn participant(p: &HistoryParticipant) -> GroupParticipant {
    let rank = match p.rank {
        // An absent rank is the protocol default, regular.
        Some(HistoryRank::Regular) | None => Some(ParticipantRank::Regular),
        Some(HistoryRank::Admin) => Some(ParticipantRank::Admin),
        Some(HistoryRank::SuperAdmin) => Some(ParticipantRank::SuperAdmin),
        Some(HistoryRank::Unrecognized(_)) => None,
    };
    GroupParticipant::new(p.user_jid.clone(), rank)
}

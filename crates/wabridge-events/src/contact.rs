// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact, presence, and group events as partial [`Contact`] updates.
//!
//! These mappings are pure. Profile photos are attached by the router after
//! mapping since pulling one needs the transport.

use chrono::{DateTime, Utc};
use wabridge_core::raw::group::{MemberAddMode, SnapshotParticipant};
use wabridge_core::raw::presence::{ChatPresenceMedia, ChatPresenceState};
use wabridge_core::raw::{
    ArchiveEvent, BusinessNameEvent, ChatPresenceEvent, ContactEvent, GroupInfoEvent,
    JoinedGroupEvent, MuteEvent, PinEvent, PresenceEvent, PushNameEvent, StoredContact,
    UserStatusMuteEvent,
};
use wabridge_core::types::{Contact, Group, GroupParticipant, ParticipantRank};

pub fn address_book(evt: &ContactEvent) -> Contact {
    Contact {
        timestamp: Some(evt.timestamp),
        contact_name: evt.action.as_ref().and_then(|a| a.full_name.clone()),
        ..Contact::new(evt.jid.to_string())
    }
}

pub fn push_name(evt: &PushNameEvent) -> Contact {
    Contact {
        push_name: Some(evt.new_push_name.clone()),
        ..Contact::new(evt.jid.to_string())
    }
}

/// Business names share the push name slot.
pub fn business_name(evt: &BusinessNameEvent) -> Contact {
    Contact {
        push_name: Some(evt.new_business_name.clone()),
        ..Contact::new(evt.jid.to_string())
    }
}

pub fn pin(evt: &PinEvent) -> Contact {
    Contact {
        timestamp: Some(evt.timestamp),
        pinned: evt.action.as_ref().and_then(|a| a.pinned),
        ..Contact::new(evt.jid.to_string())
    }
}

pub fn mute(evt: &MuteEvent) -> Contact {
    let action = evt.action.as_ref();
    Contact {
        timestamp: Some(evt.timestamp),
        muted: action.and_then(|a| a.muted),
        mute_end_timestamp: action.and_then(|a| a.mute_end_timestamp),
        ..Contact::new(evt.jid.to_string())
    }
}

pub fn archive(evt: &ArchiveEvent) -> Contact {
    Contact {
        timestamp: Some(evt.timestamp),
        archived: evt.action.as_ref().and_then(|a| a.archived),
        ..Contact::new(evt.jid.to_string())
    }
}

pub fn status_mute(evt: &UserStatusMuteEvent) -> Contact {
    Contact {
        timestamp: Some(evt.timestamp),
        status_muted: evt.action.as_ref().and_then(|a| a.muted),
        ..Contact::new(evt.jid.to_string())
    }
}

/// Typing indicators for a chat.
///
/// Both indicator fields are always set; the one not in use is `""`, which
/// tells the consumer the activity stopped. Composing also marks the chat as
/// seen at `now`.
pub fn chat_presence(evt: &ChatPresenceEvent, now: DateTime<Utc>) -> Contact {
    let mut contact = Contact {
        typing: Some(String::new()),
        recording: Some(String::new()),
        ..Contact::new(evt.source.chat.to_string())
    };

    if evt.state == ChatPresenceState::Composing {
        let sender = evt.source.sender.to_string();
        match evt.media {
            ChatPresenceMedia::Audio => contact.recording = Some(sender),
            ChatPresenceMedia::Text => contact.typing = Some(sender),
        }
        contact.available = Some(true);
        contact.last_seen = Some(now);
    }

    contact
}

pub fn presence(evt: &PresenceEvent) -> Contact {
    Contact {
        available: Some(!evt.unavailable),
        last_seen: evt.last_seen,
        ..Contact::new(evt.from.to_string())
    }
}

/// Full group snapshot with the member list as a replace-all set.
pub fn joined_group(evt: &JoinedGroupEvent) -> Contact {
    let group = &evt.group;
    Contact {
        is_group: Some(true),
        group: Group {
            group_name: Some(group.name.clone()),
            group_topic: Some(group.topic.clone()),
            group_info_locked_to_admins: Some(group.is_locked),
            group_only_admin_can_message: Some(group.is_announce),
            group_only_admins_can_add_members: Some(group.member_add_mode == MemberAddMode::Admin),
            group_is_parent: Some(group.is_parent),
            group_linked_parent_jid: group.linked_parent_jid.as_ref().map(ToString::to_string),
            group_is_default_sub_group: Some(group.is_default_sub_group),
            group_join_approval_required: Some(group.is_join_approval_required),
            group_created: group.group_created,
            group_replace_participants: group.participants.iter().map(ranked).collect(),
            ..Group::default()
        },
        ..Contact::new(group.jid.to_string())
    }
}

fn ranked(participant: &SnapshotParticipant) -> GroupParticipant {
    let rank = if participant.is_super_admin {
        ParticipantRank::SuperAdmin
    } else if participant.is_admin {
        ParticipantRank::Admin
    } else {
        ParticipantRank::Regular
    };
    GroupParticipant::new(participant.jid.to_string(), Some(rank))
}

/// Changed group settings plus member deltas.
///
/// Joins carry no rank. Promotions and demotions are re-adds with the new rank.
pub fn group_info(evt: &GroupInfoEvent) -> Contact {
    let unranked = evt.join.iter().map(|jid| GroupParticipant::new(jid.to_string(), None));
    let promoted = evt
        .promote
        .iter()
        .map(|jid| GroupParticipant::new(jid.to_string(), Some(ParticipantRank::Admin)));
    let demoted = evt
        .demote
        .iter()
        .map(|jid| GroupParticipant::new(jid.to_string(), Some(ParticipantRank::Regular)));

    Contact {
        is_group: Some(true),
        group: Group {
            group_name: evt.name.as_ref().map(|n| n.name.clone()),
            group_topic: evt.topic.as_ref().map(|t| t.topic.clone()),
            group_info_locked_to_admins: evt.locked.as_ref().map(|l| l.is_locked),
            group_only_admin_can_message: evt.announce.as_ref().map(|a| a.is_announce),
            group_join_approval_required: evt
                .membership_approval_mode
                .as_ref()
                .map(|m| m.is_join_approval_required),
            group_invite_link: evt.new_invite_link.clone(),
            group_add_participants: unranked.chain(promoted).chain(demoted).collect(),
            group_removed_participants: evt
                .leave
                .iter()
                .map(|jid| GroupParticipant::new(jid.to_string(), None))
                .collect(),
            ..Group::default()
        },
        ..Contact::new(evt.jid.to_string())
    }
}

/// A contact held in the transport's store. Empty names are left unset.
pub fn stored(contact: &StoredContact) -> Contact {
    let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
    Contact {
        contact_name: non_empty(&contact.full_name),
        push_name: non_empty(&contact.push_name),
        ..Contact::new(contact.jid.to_string())
    }
}

// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch from the transport to the consumer's callbacks.
//!
//! Every raw event leads to exactly one of: domain records, a status change
//! (with its error), or a log line. Records are delivered synchronously and in
//! the order the events arrive.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use tracing::{Instrument, debug, debug_span, error, info, trace, warn};
use wabridge_core::raw::{HistorySyncEvent, PresenceState, PushNameSettingEvent, RawEvent};
use wabridge_core::types::{CallStatus, ConnStatus, Contact, Message, User};
use wabridge_core::{BridgeError, ConnectionError, EventSink, Jid, PhotoIdStore, Transport};
use wabridge_media::{AttachmentStore, MimeRegistry, ProfilePhotoBridge};

use crate::connection::{self, Transition};
use crate::message::MessageNormalizer;
use crate::receipt::{self, ReceiptOutcome};
use crate::{call, contact, history};

/// Normalizes raw transport events into consumer callbacks.
///
/// One router serves one connection. Its collaborators are injected: the
/// transport it queries, the sink it delivers to, the photo id store, and the
/// media directory.
pub struct EventRouter {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    store: Arc<AttachmentStore>,
    photos: ProfilePhotoBridge,
    messages: MessageNormalizer,
}

impl EventRouter {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn EventSink>,
        photo_ids: Arc<dyn PhotoIdStore>,
        store: Arc<AttachmentStore>,
    ) -> Self {
        let photos = ProfilePhotoBridge::new(transport.clone(), photo_ids, store.clone());
        let messages = MessageNormalizer::new(transport.clone(), store.clone(), MimeRegistry::new());
        Self {
            transport,
            sink,
            store,
            photos,
            messages,
        }
    }

    /// Use `mime` to pick attachment extensions.
    pub fn with_mime(mut self, mime: MimeRegistry) -> Self {
        self.messages = MessageNormalizer::new(self.transport.clone(), self.store.clone(), mime);
        self
    }

    /// Handle one transport event.
    ///
    /// Never fails: problems are logged, and a panic while handling one
    /// event is contained so the delivery loop keeps running.
    pub async fn handle_event(&self, evt: RawEvent) {
        let kind = evt.kind().to_string();
        self.contained(&kind, async {
            trace!(event = ?evt, "event received");
            self.dispatch(evt).await;
        })
        .await;
    }

    /// A pairing code arrived. The status always precedes the code.
    pub async fn handle_qr_code(&self, code: &str) {
        self.contained("QRCode", async {
            self.sink.conn_status(ConnStatus::QrCodeScan);
            self.sink.qr_code(code);
        })
        .await;
    }

    /// Push every contact in the transport's store to the consumer.
    ///
    /// A panic part way through stops the sync and is reported as an
    /// internal error.
    pub async fn sync_all_contacts(&self) -> Result<(), BridgeError> {
        self.contained("ContactSync", self.push_stored_contacts())
            .await
            .unwrap_or_else(|| Err(BridgeError::Internal("contact sync panicked".into())))
    }

    async fn push_stored_contacts(&self) -> Result<(), BridgeError> {
        let contacts = self.transport.all_contacts().await?;
        info!(count = contacts.len(), "syncing stored contacts");
        for stored in contacts {
            self.deliver_contact(contact::stored(&stored), &stored.jid).await;
        }
        Ok(())
    }

    /// Run `work` inside the event span, turning a panic into an error log.
    async fn contained<T>(&self, kind: &str, work: impl Future<Output = T>) -> Option<T> {
        let span = debug_span!("event", kind = %kind);
        match AssertUnwindSafe(work).catch_unwind().instrument(span).await {
            Ok(out) => Some(out),
            Err(panic) => {
                error!(kind = %kind, panic = panic_message(panic.as_ref()), "event handler panicked");
                None
            }
        }
    }

    async fn dispatch(&self, evt: RawEvent) {
        match evt {
            RawEvent::Contact(e) => self.deliver_contact(contact::address_book(&e), &e.jid).await,
            RawEvent::PushName(e) => self.deliver_contact(contact::push_name(&e), &e.jid).await,
            RawEvent::BusinessName(e) => {
                self.deliver_contact(contact::business_name(&e), &e.jid).await
            }
            RawEvent::Pin(e) => self.sink.contact(contact::pin(&e)),
            RawEvent::Mute(e) => self.sink.contact(contact::mute(&e)),
            RawEvent::Archive(e) => self.sink.contact(contact::archive(&e)),
            RawEvent::UserStatusMute(e) => self.sink.contact(contact::status_mute(&e)),
            RawEvent::Star(e) => self.sink.message(Message {
                starred: e.action.and_then(|a| a.starred),
                ..Message::keyed(e.message_id, e.chat_jid.to_string())
            }),
            RawEvent::DeleteForMe(e) => self.sink.message(Message {
                deleted: e.action.map(|_| true),
                ..Message::keyed(e.message_id, e.chat_jid.to_string())
            }),
            RawEvent::PushNameSetting(e) => self.sink.user(account_name(e)),
            RawEvent::AppStateSyncComplete(e) => {
                info!(name = %e.name, "app state sync complete");
            }

            RawEvent::CallOffer(e) => self.sink.call(call::signal(&e, CallStatus::Offer)),
            RawEvent::CallAccept(e) => self.sink.call(call::signal(&e, CallStatus::Accept)),
            RawEvent::CallPreAccept(e) => self.sink.call(call::signal(&e, CallStatus::PreAccept)),
            RawEvent::CallTransport(e) => self.sink.call(call::signal(&e, CallStatus::Transport)),
            RawEvent::CallReject(e) => self.sink.call(call::signal(&e, CallStatus::Reject)),
            RawEvent::CallOfferNotice(e) => self.sink.call(call::offer_notice(&e)),
            RawEvent::CallTerminate(e) => self.sink.call(call::terminate(&e)),

            RawEvent::Connected => {
                info!("connected, announcing presence");
                if let Err(e) = self.transport.send_presence(PresenceState::Available).await {
                    warn!(error = %e, "failed to send presence");
                }
                self.sink.conn_status(ConnStatus::Connected);
            }
            RawEvent::Disconnected => {
                info!("disconnected");
                self.sink.conn_status(ConnStatus::Disconnected);
            }
            RawEvent::PermanentDisconnect => {
                info!("permanently disconnected");
                self.sink.conn_status(ConnStatus::Disconnected);
            }
            RawEvent::LoggedOut(e) => {
                warn!(on_connect = e.on_connect, reason = ?e.reason, "logged out");
                self.sink.conn_status(ConnStatus::LoggedOut);
            }
            RawEvent::StreamReplaced => {
                self.transport.disconnect().await;
                self.transition(Transition::fault(ConnectionError::StreamReplaced));
            }
            RawEvent::ManualLoginReconnect => debug!("manual login reconnect requested"),
            RawEvent::TemporaryBan(e) => self.transition(connection::temporary_ban(&e)),
            RawEvent::ConnectFailure(e) => self.transition(connection::connect_failure(&e)),
            RawEvent::ClientOutdated => {
                self.transition(Transition::fault(ConnectionError::ClientOutdated))
            }
            RawEvent::CatRefreshError(e) => self.transition(connection::cat_refresh(&e)),
            RawEvent::StreamError(e) => self.transition(connection::stream_error(&e)),

            RawEvent::HistorySync(e) => self.replay_history(e).await,
            RawEvent::Message(e) => {
                if let Some(message) = self.messages.normalize(&e).await {
                    self.sink.message(message);
                }
            }
            RawEvent::Receipt(e) => match receipt::receipt(&e) {
                ReceiptOutcome::Statuses(messages) => {
                    for message in messages {
                        self.sink.message(message);
                    }
                }
                ReceiptOutcome::Inactive(contact) => self.sink.contact(contact),
                ReceiptOutcome::Unrecognized(receipt_type) => {
                    error!(chat = %e.source.chat, receipt_type = ?receipt_type, "unknown receipt type received");
                }
            },
            RawEvent::ChatPresence(e) => self.sink.contact(contact::chat_presence(&e, Utc::now())),
            RawEvent::Presence(e) => self.deliver_contact(contact::presence(&e), &e.from).await,
            RawEvent::JoinedGroup(e) => {
                self.deliver_contact(contact::joined_group(&e), &e.group.jid).await
            }
            RawEvent::GroupInfo(e) => self.deliver_contact(contact::group_info(&e), &e.jid).await,
            RawEvent::Picture(e) => self.deliver_contact(Contact::new(e.jid.to_string()), &e.jid).await,
            RawEvent::OfflineSyncPreview(e) => {
                info!(
                    total = e.total,
                    app_data_changes = e.app_data_changes,
                    messages = e.messages,
                    notifications = e.notifications,
                    receipts = e.receipts,
                    "offline sync preview"
                );
            }
            RawEvent::OfflineSyncCompleted(e) => info!(count = e.count, "offline sync completed"),

            RawEvent::Unmapped { kind, payload } => {
                warn!(kind = %kind, payload = %payload, "event type not implemented");
            }
            RawEvent::Unknown { kind, payload } => {
                warn!(kind = %kind, payload = %payload, "unknown event type");
            }
        }
    }

    fn transition(&self, transition: Transition) {
        if let Some(err) = &transition.error {
            error!(error = %err, "connection fault");
        }
        self.sink.conn_status(transition.status);
        if let Some(err) = transition.error {
            self.sink.error(err);
        }
    }

    /// Attach the current profile photo, if it changed, and deliver.
    async fn deliver_contact(&self, mut contact: Contact, jid: &Jid) {
        contact.profile_photo = self.profile_photo(jid).await;
        self.sink.contact(contact);
    }

    async fn profile_photo(&self, jid: &Jid) -> Option<String> {
        match self.photos.pull(jid).await {
            Ok(name) => name,
            Err(e) => {
                warn!(jid = %jid, error = %e, "failed to pull profile photo");
                None
            }
        }
    }

    async fn replay_history(&self, evt: HistorySyncEvent) {
        self.sink.conn_status(ConnStatus::Connected);
        let conversations = evt.data.conversations;
        info!(conversations = conversations.len(), "replaying history sync");

        for conv in &conversations {
            let Some(mut contact) = history::conversation_contact(conv) else {
                continue;
            };

            let chat = match Jid::parse(&contact.jid) {
                Ok(chat) => chat,
                Err(e) => {
                    warn!(jid = %contact.jid, error = %e, "failed to parse jid during history sync");
                    self.sink.contact(contact);
                    continue;
                }
            };
            contact.profile_photo = self.profile_photo(&chat).await;
            self.sink.contact(contact);

            for stored in conv.messages.iter().filter_map(|m| m.message.as_ref()) {
                let evt = match self.transport.parse_web_message(&chat, stored) {
                    Ok(Some(evt)) => evt,
                    Ok(None) => continue,
                    Err(e) => {
                        error!(chat = %chat, error = %e, "error parsing web message");
                        continue;
                    }
                };
                if let Some(message) = self.messages.normalize(&evt).await {
                    self.sink.message(message);
                }
            }
        }
    }
}

fn account_name(evt: PushNameSettingEvent) -> User {
    User {
        timestamp: evt.timestamp,
        name: evt.action.and_then(|a| a.name),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

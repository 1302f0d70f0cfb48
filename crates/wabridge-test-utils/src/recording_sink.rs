// SPDX-FileCopyrightText: 2026 Wabridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event sink that keeps every callback for later assertions.

use std::sync::Mutex;

use wabridge_core::types::{Call, ConnStatus, Contact, Message, User};
use wabridge_core::{ConnectionError, EventSink};

/// One captured callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Emitted {
    QrCode(String),
    ConnStatus(ConnStatus),
    Error(ConnectionError),
    Contact(Contact),
    Message(Message),
    Call(Call),
    User(User),
}

/// Captures callbacks in the order they were delivered.
#[derive(Debug, Default)]
pub struct RecordingSink {
    emitted: Mutex<Vec<Emitted>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far.
    pub fn emitted(&self) -> Vec<Emitted> {
        self.emitted.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.emitted.lock().unwrap().clear();
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.filter(|e| match e {
            Emitted::Contact(c) => Some(c.clone()),
            _ => None,
        })
    }

    pub fn messages(&self) -> Vec<Message> {
        self.filter(|e| match e {
            Emitted::Message(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.filter(|e| match e {
            Emitted::Call(c) => Some(c.clone()),
            _ => None,
        })
    }

    pub fn statuses(&self) -> Vec<ConnStatus> {
        self.filter(|e| match e {
            Emitted::ConnStatus(s) => Some(*s),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<ConnectionError> {
        self.filter(|e| match e {
            Emitted::Error(err) => Some(err.clone()),
            _ => None,
        })
    }

    fn filter<T>(&self, pick: impl Fn(&Emitted) -> Option<T>) -> Vec<T> {
        self.emitted.lock().unwrap().iter().filter_map(pick).collect()
    }

    fn push(&self, item: Emitted) {
        self.emitted.lock().unwrap().push(item);
    }
}

impl EventSink for RecordingSink {
    fn qr_code(&self, code: &str) {
        self.push(Emitted::QrCode(code.to_string()));
    }

    fn conn_status(&self, status: ConnStatus) {
        self.push(Emitted::ConnStatus(status));
    }

    fn error(&self, error: ConnectionError) {
        self.push(Emitted::Error(error));
    }

    fn contact(&self, contact: Contact) {
        self.push(Emitted::Contact(contact));
    }

    fn message(&self, message: Message) {
        self.push(Emitted::Message(message));
    }

    fn call(&self, call: Call) {
        self.push(Emitted::Call(call));
    }

    fn user(&self, user: User) {
        self.push(Emitted::User(user));
    }
}

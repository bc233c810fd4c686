//! External delivery channels for vitals alerts.

pub mod webhook;

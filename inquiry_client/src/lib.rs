//! Client side of the contact form: the blur checks shown to the visitor and
//! the submission flow against the contact endpoint.

pub use client::{ContactFormApi, ContactFormClient, ContactFormResponse};

mod client;
pub mod controller;
pub mod http;
pub mod validate;

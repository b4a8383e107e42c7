//! Formbot - Slot-collection forms for conversational agents
//!
//! This crate implements a framework-agnostic form engine: a form declares
//! required slots with extraction strategies and validators, and a session
//! collects them one turn at a time, re-prompting on rejected values until
//! the form can be submitted. A contact form and a revertible greeting
//! action are included, exposed to a host runtime as named actions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! This module constitutes the core, headless suggestion engine of termdict.
//! It holds the term repository, the boundary scanners, edit-distance
//! ranking, case adaptation, and the two suggestion providers, together
//! with the collaborator interfaces for the text buffer, the term store,
//! and user notices.

pub mod app;
pub mod boundary;
pub mod buffer;
pub mod case;
pub mod definition;
pub mod distance;
pub mod editor;
pub mod lookup;
pub mod notice;
pub mod repository;
pub mod store;
pub mod suggest;

//! Flutter bridge for the FamilyApp core store.

pub mod api;

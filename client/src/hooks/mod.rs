//! Resource hooks: list state plus CRUD for each backend collection.
//!
//! SYSTEM CONTEXT
//! ==============
//! `collection::ResourceHook` is generic over a `RestResource`. The other
//! modules add the endpoints specific to one collection (appointment
//! cancellation, bulk slot creation, document upload, ...) as inherent
//! impls on the concrete hook.

pub mod appointments;
pub mod collection;
pub mod consultations;
pub mod documents;
pub mod medicaments;
pub mod patients;
pub mod schedules;
pub mod time_slots;

pub use collection::{ResourceHook, SignalHook, use_collection, use_resource};

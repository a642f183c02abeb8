//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (hooks, navigation) and
//! delegates shared chrome to `components`. Protected pages render inside a
//! guarded layout and assume a session of the right role.

pub mod brain_tumor;
pub mod doctor;
pub mod login;
pub mod patient;
pub mod patient_detail;

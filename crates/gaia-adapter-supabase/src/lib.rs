//! # gaia-adapter-supabase
//!
//! Implements the `gaia-scheduling` collaborator traits against a Supabase
//! project:
//!
//! | Trait | Upstream |
//! |-------|----------|
//! | `AvailabilityService` | `GET /functions/v1/<availability function>` |
//! | `DoctorSchedule` | `GET /functions/v1/<doctor schedule path>` |
//! | `PatientDirectory` | `GET`/`POST /functions/v1/patients-api/...` |
//! | `RecordStore` | `/rest/v1/<table>` |
//!
//! Every request carries the service key both as a bearer token and in the
//! `apikey` header.

mod client;
mod functions;
mod records;

pub use client::{SupabaseClient, SupabaseError};

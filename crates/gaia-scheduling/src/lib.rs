//! # gaia-scheduling
//!
//! Scheduling operations for the Gaia tool gateway: availability checks with a
//! bounded fallback search, appointment CRUD, and patient find-or-create.
//!
//! Nothing in this crate performs I/O directly. Every operation is written
//! against the collaborator traits in [`adapter`]:
//!
//! ```text
//!  AvailabilityResolver ──► AvailabilityService
//!  AppointmentService   ──► RecordStore, DoctorSchedule
//!  PatientResolver      ──► PatientDirectory
//! ```
//!
//! `gaia-adapter-supabase` implements all four for the hosted backend; tests
//! use in-memory fakes.

pub mod adapter;
pub mod appointments;
pub mod availability;
pub mod clock;
pub mod error;
pub mod patients;

pub use adapter::{
    AvailabilityService, DoctorSchedule, Filter, FilterOp, Order, PatientDirectory, RecordStore,
    SelectQuery, UpstreamError,
};
pub use appointments::{
    AppointmentService, CancelAppointment, ListAppointments, ScheduleAppointment, StatusFilter,
    UpdateAppointment,
};
pub use availability::AvailabilityResolver;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SchedulingError;
pub use patients::{GetOrCreatePatient, NewPatient, PatientLookup, PatientResolver};

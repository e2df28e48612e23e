// --- File: crates/tourly_scheduling/src/lib.rs ---
// Declare modules within this crate
pub mod blocked;
pub mod booking;
pub mod cancellation;
#[cfg(test)]
mod cancellation_test;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod horizon;
pub mod models;
pub mod repository;
pub mod reschedule;
#[cfg(test)]
mod reschedule_test;
pub mod routes;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
#[cfg(test)]
mod slots_test;
#[cfg(test)]
mod test_support;

//! In-memory recruitment ledger: candidates, job openings, and the interview
//! applications linking them, served over a small JSON API.

pub mod config;
pub mod error;
pub mod recruitment;
pub mod telemetry;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildband — Core types, configuration and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod natural;
pub mod types;

pub use config::BatchConfig;
pub use error::BildbandError;
pub use natural::{NaturalKey, natural_cmp, natural_sorted, sort_naturally};
pub use types::*;

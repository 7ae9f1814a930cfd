//! Shared test harness modules for the Powder CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod recommend_steps;
mod unit;

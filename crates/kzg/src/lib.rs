//! # pairing-kzg
//!
//! KZG polynomial commitments whose commitments and openings are computed with
//! [`pairing_msm`](msm).
//!
//! Polynomials are coefficient vectors, lowest degree first. Verification is a single two-term
//! multi-pairing.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod error;
pub mod kzg;
pub mod poly;
pub mod srs;
pub mod transcript;

pub use error::{KzgError, KzgResult};
pub use kzg::{
    batch_open_single_point, batch_verify_single_point, commit, open, verify, BatchOpeningProof,
    Commitment, OpeningProof,
};
pub use srs::Srs;
pub use transcript::batch_challenge;

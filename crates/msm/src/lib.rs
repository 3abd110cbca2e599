//! # pairing-msm
//!
//! Multi-scalar multiplication `Σ sᵢ·Pᵢ` on short Weierstrass curves.
//!
//! The engine is a Pippenger bucket method with three refinements:
//!
//! * scalars are recoded into signed digits, halving the number of buckets per window;
//! * buckets are kept in affine coordinates and filled through batches of additions that share
//!   a single field inversion;
//! * windows are independent and run on the rayon thread pool with the `parallel` feature.
//!
//! ```
//! # #[cfg(feature = "bn254")] {
//! use ark_ec::{AffineRepr, CurveGroup};
//! use ark_bn254::{Fr, G1Affine};
//!
//! let g = G1Affine::generator();
//! let points = [g, (g + g).into_affine()];
//! let scalars = [Fr::from(3u64), Fr::from(5u64)];
//! let sum = pairing_msm::bn254::g1_msm(&points, &scalars).unwrap();
//! assert_eq!(sum, (g * Fr::from(13u64)).into_affine());
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

mod batch_affine;
mod bucket;
mod chunk;
pub mod config;
pub mod error;
mod msm;
pub mod recode;
mod xyzz;

#[cfg(feature = "bls12-381")]
pub mod bls12_381;
#[cfg(feature = "bn254")]
pub mod bn254;

#[cfg(test)]
mod test_curve;

pub use config::{best_window_width, default_batch_capacity, MsmConfig};
pub use error::{MsmError, MsmResult};
pub use msm::{msm, msm_with_config};

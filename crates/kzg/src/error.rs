//! Errors reported by commitment, opening and verification.
use msm::MsmError;
use thiserror::Error;

/// Result type of the KZG operations.
pub type KzgResult<T> = Result<T, KzgError>;

/// KZG errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KzgError {
    /// Polynomial has more coefficients than the SRS has powers of tau.
    #[error("polynomial has {len} coefficients, the SRS supports {max}")]
    PolynomialTooLarge {
        /// Number of coefficients.
        len: usize,
        /// Size of the SRS.
        max: usize,
    },
    /// Batch is empty, or commitments and claimed values disagree in number.
    #[error(
        "invalid number of polynomials: {polynomials} polynomials, {claimed_values} claimed values"
    )]
    InvalidNumberOfPolynomials {
        /// Number of polynomials or commitments.
        polynomials: usize,
        /// Number of claimed values.
        claimed_values: usize,
    },
    /// Pairing check of an opening proof failed.
    #[error("opening proof verification failed")]
    VerificationFailed,
    /// Transcript input could not be serialized.
    #[error("failed to serialize transcript input")]
    Serialization,
    /// Commitment MSM failed.
    #[error(transparent)]
    Msm(#[from] MsmError),
}

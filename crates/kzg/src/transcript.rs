//! Fiat-Shamir challenge of a batch opening.
use crate::error::{KzgError, KzgResult};
use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};
use std::vec::Vec;

/// Domain separator of the folding challenge.
const GAMMA_LABEL: &[u8] = b"gamma";

/// Derives the folding challenge `gamma` of a batch opening at `point`.
///
/// SHA-256 of the label, `point`, every commitment and every claimed value, all in compressed
/// form, read big-endian and reduced modulo the scalar field order. Binding the claimed values
/// keeps a prover from choosing them after the challenge is known.
///
/// # Errors
///
/// Returns [`KzgError::Serialization`] if an input cannot be serialized.
pub fn batch_challenge<E: Pairing>(
    point: &E::ScalarField,
    commitments: &[E::G1Affine],
    claimed_values: &[E::ScalarField],
) -> KzgResult<E::ScalarField> {
    let mut bytes = Vec::new();
    point
        .serialize_compressed(&mut bytes)
        .map_err(|_| KzgError::Serialization)?;
    for commitment in commitments {
        commitment
            .serialize_compressed(&mut bytes)
            .map_err(|_| KzgError::Serialization)?;
    }
    for value in claimed_values {
        value
            .serialize_compressed(&mut bytes)
            .map_err(|_| KzgError::Serialization)?;
    }

    let digest = Sha256::new()
        .chain_update(GAMMA_LABEL)
        .chain_update(&bytes)
        .finalize();
    Ok(E::ScalarField::from_be_bytes_mod_order(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Bn254, Fr, G1Affine};
    use ark_ec::AffineRepr;
    use ark_ff::One;

    #[test]
    fn binds_every_input() {
        let g = G1Affine::generator();
        let point = Fr::from(7u64);
        let values = [Fr::from(1u64), Fr::from(2u64)];
        let commitments = [g, (g * Fr::from(3u64)).into()];
        let gamma = batch_challenge::<Bn254>(&point, &commitments, &values).unwrap();
        assert_eq!(
            batch_challenge::<Bn254>(&point, &commitments, &values),
            Ok(gamma)
        );

        let moved = point + Fr::one();
        assert_ne!(batch_challenge::<Bn254>(&moved, &commitments, &values), Ok(gamma));
        let swapped = [commitments[1], commitments[0]];
        assert_ne!(batch_challenge::<Bn254>(&point, &swapped, &values), Ok(gamma));
        let tampered = [values[0], values[1] + Fr::one()];
        assert_ne!(batch_challenge::<Bn254>(&point, &commitments, &tampered), Ok(gamma));
        assert_ne!(batch_challenge::<Bn254>(&point, &commitments[..1], &values[..1]), Ok(gamma));
    }
}

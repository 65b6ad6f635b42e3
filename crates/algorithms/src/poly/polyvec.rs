//! Vectors and matrices of ring elements, in module dimension `k`.
//!
//! Dimension is a runtime value carried by each container; mixing dimensions
//! is a caller error and is reported rather than panicking.

use zeroize::Zeroize;

use crate::error::{Error, Result};

use super::{NttPoly, Poly};

/// A length-`k` vector of standard-domain ring elements.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct PolyVec {
    polys: Vec<Poly>,
}

/// A length-`k` vector of transform-domain ring elements.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct NttPolyVec {
    polys: Vec<NttPoly>,
}

/// A `k` by `k` matrix of transform-domain ring elements, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttMatrix {
    rows: Vec<NttPolyVec>,
}

impl PolyVec {
    pub fn zero(k: usize) -> Self {
        Self {
            polys: vec![Poly::zero(); k],
        }
    }

    pub fn from_polys(polys: Vec<Poly>) -> Self {
        Self { polys }
    }

    pub fn dim(&self) -> usize {
        self.polys.len()
    }

    pub fn polys(&self) -> &[Poly] {
        &self.polys
    }

    /// Componentwise sum; dimensions must match.
    pub fn add(&self, other: &Self) -> Result<Self> {
        check_dim("polynomial vector addition", self.dim(), other.dim())?;
        Ok(Self {
            polys: self
                .polys
                .iter()
                .zip(&other.polys)
                .map(|(a, b)| a.add(b))
                .collect(),
        })
    }

    /// Forward transform applied to every component.
    pub fn ntt(&self) -> Result<NttPolyVec> {
        let polys = self
            .polys
            .iter()
            .map(|p| p.ntt())
            .collect::<Result<Vec<_>>>()?;
        Ok(NttPolyVec { polys })
    }
}

impl NttPolyVec {
    pub fn zero(k: usize) -> Self {
        Self {
            polys: vec![NttPoly::zero(); k],
        }
    }

    pub fn from_polys(polys: Vec<NttPoly>) -> Self {
        Self { polys }
    }

    pub fn dim(&self) -> usize {
        self.polys.len()
    }

    pub fn polys(&self) -> &[NttPoly] {
        &self.polys
    }

    /// Componentwise sum; dimensions must match.
    pub fn add(&self, other: &Self) -> Result<Self> {
        check_dim("transform vector addition", self.dim(), other.dim())?;
        Ok(Self {
            polys: self
                .polys
                .iter()
                .zip(&other.polys)
                .map(|(a, b)| a.add(b))
                .collect(),
        })
    }

    /// Inner product, accumulated in the transform domain.
    pub fn dot(&self, other: &Self) -> Result<NttPoly> {
        check_dim("inner product", self.dim(), other.dim())?;
        let mut acc = NttPoly::zero();
        for (a, b) in self.polys.iter().zip(&other.polys) {
            acc = acc.add(&a.pointwise_mul(b));
        }
        Ok(acc)
    }

    /// Inverse transform applied to every component.
    pub fn intt(&self) -> Result<PolyVec> {
        let polys = self
            .polys
            .iter()
            .map(|p| p.intt())
            .collect::<Result<Vec<_>>>()?;
        Ok(PolyVec { polys })
    }
}

impl NttMatrix {
    /// Builds a matrix from its rows; every row must have one entry per row.
    pub fn from_rows(rows: Vec<NttPolyVec>) -> Result<Self> {
        let k = rows.len();
        for row in &rows {
            check_dim("matrix row width", k, row.dim())?;
        }
        Ok(Self { rows })
    }

    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[NttPolyVec] {
        &self.rows
    }

    /// Matrix-vector product, entirely in the transform domain.
    pub fn mul_vec(&self, v: &NttPolyVec) -> Result<NttPolyVec> {
        check_dim("matrix-vector product", self.dim(), v.dim())?;
        let polys = self
            .rows
            .iter()
            .map(|row| row.dot(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(NttPolyVec { polys })
    }
}

fn check_dim(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use latkem_params::RING_N;

    fn sample_vec(k: usize, seed: u32) -> PolyVec {
        let mut state = seed;
        let polys = (0..k)
            .map(|_| {
                let mut coeffs = [0u32; RING_N];
                for c in coeffs.iter_mut() {
                    state = state.wrapping_mul(1103515245).wrapping_add(12345);
                    *c = (state >> 8) % latkem_params::RING_Q;
                }
                Poly::from_coeffs(&coeffs).unwrap()
            })
            .collect();
        PolyVec::from_polys(polys)
    }

    #[test]
    fn dot_matches_componentwise_ring_products() {
        let a = sample_vec(3, 1);
        let b = sample_vec(3, 2);

        let dot = a.ntt().unwrap().dot(&b.ntt().unwrap()).unwrap();
        let via_dot = dot.intt().unwrap();

        let mut expected = Poly::zero();
        for (p, g) in a.polys().iter().zip(b.polys()) {
            expected = expected.add(&p.schoolbook_mul(g));
        }
        assert_eq!(via_dot, expected);
    }

    #[test]
    fn matrix_vector_product() {
        let rows = vec![
            sample_vec(2, 10).ntt().unwrap(),
            sample_vec(2, 20).ntt().unwrap(),
        ];
        let m = NttMatrix::from_rows(rows.clone()).unwrap();
        let v = sample_vec(2, 30).ntt().unwrap();

        let out = m.mul_vec(&v).unwrap();
        assert_eq!(out.dim(), 2);
        for (row, got) in rows.iter().zip(out.polys()) {
            assert_eq!(row.dot(&v).unwrap(), *got);
        }
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let a = sample_vec(2, 1).ntt().unwrap();
        let b = sample_vec(3, 2).ntt().unwrap();
        assert!(matches!(a.dot(&b), Err(Error::Length { .. })));
        assert!(matches!(a.add(&b), Err(Error::Length { .. })));

        let m = NttMatrix::from_rows(vec![a.clone(), a.clone()]).unwrap();
        assert!(matches!(m.mul_vec(&b), Err(Error::Length { .. })));
    }

    #[test]
    fn ragged_matrix_rejected() {
        let short = sample_vec(1, 1).ntt().unwrap();
        let wide = sample_vec(2, 2).ntt().unwrap();
        assert!(NttMatrix::from_rows(vec![wide, short]).is_err());
    }

    #[test]
    fn vector_transform_roundtrip() {
        let v = sample_vec(4, 5);
        assert_eq!(v.ntt().unwrap().intt().unwrap(), v);
    }
}

//! Extended Jacobian (`XYZZ`) coordinates used to reduce buckets and windows.
//!
//! A point `(X, Y, ZZ, ZZZ)` represents `(X/ZZ, Y/ZZZ)` with `ZZ³ = ZZZ²`; `ZZ = 0` is the
//! identity. Mixed additions with affine points cost `8M + 2S` and need no inversion.
use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ff::{AdditiveGroup, Field, One, Zero};
use core::fmt;

pub(crate) struct Xyzz<P: SWCurveConfig> {
    x: P::BaseField,
    y: P::BaseField,
    zz: P::BaseField,
    zzz: P::BaseField,
}

impl<P: SWCurveConfig> Clone for Xyzz<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: SWCurveConfig> Copy for Xyzz<P> {}

impl<P: SWCurveConfig> fmt::Debug for Xyzz<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("Xyzz(infinity)");
        }
        f.debug_struct("Xyzz")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("zz", &self.zz)
            .field("zzz", &self.zzz)
            .finish()
    }
}

impl<P: SWCurveConfig> Default for Xyzz<P> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<P: SWCurveConfig> Xyzz<P> {
    pub(crate) fn identity() -> Self {
        Self {
            x: P::BaseField::one(),
            y: P::BaseField::one(),
            zz: P::BaseField::zero(),
            zzz: P::BaseField::zero(),
        }
    }

    #[inline]
    pub(crate) fn is_identity(&self) -> bool {
        self.zz.is_zero()
    }

    fn from_affine(p: &Affine<P>) -> Self {
        if p.infinity {
            return Self::identity();
        }
        Self {
            x: p.x,
            y: p.y,
            zz: P::BaseField::one(),
            zzz: P::BaseField::one(),
        }
    }

    /// `self += p`.
    pub(crate) fn add_assign_affine(&mut self, p: &Affine<P>) {
        if p.infinity {
            return;
        }
        if self.is_identity() {
            *self = Self::from_affine(p);
            return;
        }

        // madd-2008-s
        let pp = p.x * self.zz - self.x;
        let r = p.y * self.zzz - self.y;

        if !pp.is_zero() {
            let pp2 = pp.square();
            let ppp = pp2 * pp;
            let q = self.x * pp2;
            let x3 = r.square() - ppp - q.double();
            self.y = r * (q - x3) - self.y * ppp;
            self.x = x3;
            self.zz *= pp2;
            self.zzz *= ppp;
        } else if r.is_zero() {
            *self = Self::double_affine(p);
        } else {
            *self = Self::identity();
        }
    }

    /// `self += other`.
    pub(crate) fn add_assign(&mut self, other: &Self) {
        if other.is_identity() {
            return;
        }
        if self.is_identity() {
            *self = *other;
            return;
        }

        // add-2008-s
        let u1 = self.x * other.zz;
        let s1 = self.y * other.zzz;
        let pp = other.x * self.zz - u1;
        let r = other.y * self.zzz - s1;

        if !pp.is_zero() {
            let pp2 = pp.square();
            let ppp = pp2 * pp;
            let q = u1 * pp2;
            let x3 = r.square() - ppp - q.double();
            self.y = r * (q - x3) - s1 * ppp;
            self.x = x3;
            self.zz = self.zz * other.zz * pp2;
            self.zzz = self.zzz * other.zzz * ppp;
        } else if r.is_zero() {
            self.double_in_place();
        } else {
            *self = Self::identity();
        }
    }

    /// `self = 2·self`.
    pub(crate) fn double_in_place(&mut self) {
        if self.is_identity() {
            return;
        }

        // dbl-2008-s-1
        let u = self.y.double();
        let v = u.square();
        let w = u * v;
        let s = self.x * v;
        let x2 = self.x.square();
        let m = x2.double() + x2 + P::mul_by_a(self.zz.square());
        let x3 = m.square() - s.double();
        self.y = m * (s - x3) - w * self.y;
        self.x = x3;
        self.zz *= v;
        self.zzz *= w;
    }

    /// `2·p` for an affine `p`.
    fn double_affine(p: &Affine<P>) -> Self {
        // mdbl-2008-s-1
        let u = p.y.double();
        let v = u.square();
        let w = u * v;
        let s = p.x * v;
        let x2 = p.x.square();
        let m = x2.double() + x2 + P::COEFF_A;
        let x3 = m.square() - s.double();
        Self {
            x: x3,
            y: m * (s - x3) - w * p.y,
            zz: v,
            zzz: w,
        }
    }
}

impl<P: SWCurveConfig> From<Xyzz<P>> for Projective<P> {
    fn from(p: Xyzz<P>) -> Self {
        if p.is_identity() {
            return Projective::zero();
        }
        // Jacobian (X·ZZ, Y·ZZZ, ZZ) represents (X/ZZ, Y/ZZZ).
        Projective::new_unchecked(p.x * p.zz, p.y * p.zzz, p.zz)
    }
}

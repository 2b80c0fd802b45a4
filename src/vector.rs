use crate::{Result, VectorError};
use ndarray::Array1;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

// Closeness band shared by is_zero and is_orthogonal_to.
fn default_tolerance() -> Decimal {
    Decimal::new(1, 10)
}

// Wider band for the parallel test: the angle passes through an f64
// arc-cosine, whose noise near cos = ±1 is on the order of 1e-8 radians.
const PARALLEL_TOLERANCE: f64 = 1e-6;

// a*b - c*d with overflow surfaced as an error instead of a panic.
fn cross_term(a: Decimal, b: Decimal, c: Decimal, d: Decimal) -> Result<Decimal> {
    let left = a.checked_mul(b).ok_or(VectorError::Overflow)?;
    let right = c.checked_mul(d).ok_or(VectorError::Overflow)?;
    left.checked_sub(right).ok_or(VectorError::Overflow)
}

/// An immutable n-dimensional vector over fixed-precision decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    coordinates: Array1<Decimal>,
}

/// Right-hand side of [`Vector::multiply`]: a scalar scales, a vector crosses.
#[derive(Debug, Clone)]
pub enum Multiplicand {
    Scalar(Decimal),
    Vector(Vector),
}

impl From<Decimal> for Multiplicand {
    fn from(scalar: Decimal) -> Self {
        Multiplicand::Scalar(scalar)
    }
}

impl From<Vector> for Multiplicand {
    fn from(vector: Vector) -> Self {
        Multiplicand::Vector(vector)
    }
}

impl From<&Vector> for Multiplicand {
    fn from(vector: &Vector) -> Self {
        Multiplicand::Vector(vector.clone())
    }
}

impl Vector {
    pub fn new(coordinates: impl IntoIterator<Item = Decimal>) -> Result<Self> {
        let coordinates: Vec<Decimal> = coordinates.into_iter().collect();
        if coordinates.is_empty() {
            return Err(VectorError::Empty);
        }
        Ok(Self {
            coordinates: Array1::from_vec(coordinates),
        })
    }

    pub fn from_f64s(coordinates: &[f64]) -> Result<Self> {
        let converted = coordinates
            .iter()
            .map(|&c| Decimal::from_f64(c).ok_or_else(|| VectorError::InvalidNumber(c.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Self::new(converted)
    }

    pub fn parse(coordinates: &[&str]) -> Result<Self> {
        let converted = coordinates
            .iter()
            .map(|&c| {
                Decimal::from_str(c).map_err(|_| VectorError::InvalidNumber(c.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(converted)
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinates(&self) -> &Array1<Decimal> {
        &self.coordinates
    }

    /// Euclidean magnitude. The sum of squares stays in decimal arithmetic;
    /// the square root goes through f64 because Decimal has no root
    /// primitive. That float step sets the tolerance of every closeness
    /// check on this type.
    pub fn magnitude(&self) -> Result<Decimal> {
        let squared = self.coordinates.iter().try_fold(Decimal::ZERO, |acc, c| {
            c.checked_mul(*c)
                .and_then(|square| acc.checked_add(square))
                .ok_or(VectorError::Overflow)
        })?;
        squared
            .to_f64()
            .map(f64::sqrt)
            .and_then(Decimal::from_f64)
            .ok_or_else(|| VectorError::InvalidNumber(squared.to_string()))
    }

    pub fn normalized(&self) -> Result<Vector> {
        let magnitude = self.magnitude()?;
        if magnitude == Decimal::ZERO {
            return Err(VectorError::ZeroVector);
        }
        self.scale(Decimal::ONE / magnitude)
    }

    pub fn dot(&self, other: &Vector) -> Result<Decimal> {
        self.check_dimension(other)?;
        self.coordinates
            .iter()
            .zip(other.coordinates.iter())
            .try_fold(Decimal::ZERO, |acc, (a, b)| {
                a.checked_mul(*b)
                    .and_then(|product| acc.checked_add(product))
                    .ok_or(VectorError::Overflow)
            })
    }

    /// Cross product, defined for dimension 3 only.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        if self.dimension() != 3 {
            return Err(VectorError::UnsupportedDimension(self.dimension()));
        }
        if other.dimension() != 3 {
            return Err(VectorError::UnsupportedDimension(other.dimension()));
        }

        let (x1, y1, z1) = (
            self.coordinates[0],
            self.coordinates[1],
            self.coordinates[2],
        );
        let (x2, y2, z2) = (
            other.coordinates[0],
            other.coordinates[1],
            other.coordinates[2],
        );

        Vector::new([
            cross_term(y1, z2, y2, z1)?,
            -(cross_term(x1, z2, x2, z1)?),
            cross_term(x1, y2, x2, y1)?,
        ])
    }

    pub fn area_of_parallelogram(&self, other: &Vector) -> Result<Decimal> {
        self.cross(other)?.magnitude()
    }

    pub fn area_of_triangle(&self, other: &Vector) -> Result<Decimal> {
        Ok(self.area_of_parallelogram(other)? / Decimal::TWO)
    }

    /// Angle between two vectors, in radians.
    ///
    /// The cosine is computed in decimal arithmetic, then clamped to
    /// [-1, 1] before the f64 arc-cosine to absorb float overshoot from
    /// the division. A non-finite cosine is rejected rather than clamped.
    pub fn angle(&self, other: &Vector) -> Result<f64> {
        let magnitude_product = self
            .magnitude()?
            .checked_mul(other.magnitude()?)
            .ok_or(VectorError::Overflow)?;
        if magnitude_product == Decimal::ZERO {
            return Err(VectorError::ZeroMagnitude);
        }

        let cosine = (self.dot(other)? / magnitude_product)
            .to_f64()
            .ok_or_else(|| VectorError::InvalidNumber("cosine".to_string()))?;
        if !cosine.is_finite() {
            return Err(VectorError::InvalidNumber(cosine.to_string()));
        }

        Ok(cosine.clamp(-1.0, 1.0).acos())
    }

    pub fn angle_degrees(&self, other: &Vector) -> Result<f64> {
        Ok(self.angle(other)?.to_degrees())
    }

    pub fn is_zero(&self) -> Result<bool> {
        self.is_zero_within(default_tolerance())
    }

    pub fn is_zero_within(&self, tolerance: Decimal) -> Result<bool> {
        Ok(self.magnitude()? < tolerance)
    }

    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool> {
        self.is_orthogonal_to_within(other, default_tolerance())
    }

    pub fn is_orthogonal_to_within(&self, other: &Vector, tolerance: Decimal) -> Result<bool> {
        Ok(self.dot(other)?.abs() < tolerance)
    }

    /// True if either vector is zero or the angle is 0 or pi within
    /// [`PARALLEL_TOLERANCE`].
    pub fn is_parallel_to(&self, other: &Vector) -> Result<bool> {
        if self.is_zero()? || other.is_zero()? {
            return Ok(true);
        }
        let theta = self.angle(other)?;
        Ok(theta.abs() < PARALLEL_TOLERANCE || (theta - PI).abs() < PARALLEL_TOLERANCE)
    }

    /// Component of `self` parallel to `other`.
    pub fn project_on(&self, other: &Vector) -> Result<Vector> {
        let unit = other.normalized()?;
        let length = self.dot(&unit)?;
        unit.scale(length)
    }

    /// Component of `self` perpendicular to `other`.
    pub fn orthogonal_to(&self, other: &Vector) -> Result<Vector> {
        self.subtract(&self.project_on(other)?)
    }

    /// Splits `self` into `(parallel, perpendicular)` with respect to
    /// `other`; the pair sums back to `self` up to the square-root
    /// tolerance.
    pub fn decompose(&self, other: &Vector) -> Result<(Vector, Vector)> {
        Ok((self.project_on(other)?, self.orthogonal_to(other)?))
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        let coordinates = self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(a, b)| a.checked_add(*b).ok_or(VectorError::Overflow))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            coordinates: Array1::from_vec(coordinates),
        })
    }

    pub fn subtract(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        let coordinates = self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(a, b)| a.checked_sub(*b).ok_or(VectorError::Overflow))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            coordinates: Array1::from_vec(coordinates),
        })
    }

    pub fn scale(&self, scalar: Decimal) -> Result<Vector> {
        let coordinates = self
            .coordinates
            .iter()
            .map(|c| c.checked_mul(scalar).ok_or(VectorError::Overflow))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            coordinates: Array1::from_vec(coordinates),
        })
    }

    /// Polymorphic multiply kept for interface parity: a scalar operand
    /// scales, a vector operand takes the cross product.
    pub fn multiply(&self, rhs: impl Into<Multiplicand>) -> Result<Vector> {
        match rhs.into() {
            Multiplicand::Scalar(scalar) => self.scale(scalar),
            Multiplicand::Vector(vector) => self.cross(&vector),
        }
    }

    /// Every coordinate rounded to `dp` decimal places.
    pub fn rounded(&self, dp: u32) -> Vector {
        Self {
            coordinates: self.coordinates.mapv(|c| c.round_dp(dp)),
        }
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(VectorError::DimensionMismatch {
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

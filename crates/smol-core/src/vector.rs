//! Fixed-dimension numeric vector.
//!
//! The dimension is chosen explicitly at construction and never changes.
//! Binary operations require equal dimensions and fail otherwise; the named
//! accessors `x`/`y`/`z` reject components past the dimension.

use crate::error::SketchError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    components: SmallVec<[f64; 4]>,
}

impl Vector {
    /// A `dim`-dimensional zero vector.
    pub fn zeros(dim: usize) -> Self {
        Self {
            components: SmallVec::from_elem(0.0, dim),
        }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            components: SmallVec::from_slice(values),
        }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self::from_slice(&[x, y])
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::from_slice(&[x, y, z])
    }

    pub fn dim(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.components.get(index).copied()
    }

    /// Component-wise `self - other`.
    pub fn sub(&self, other: &Vector) -> Result<Vector, SketchError> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Component-wise `self + other`.
    pub fn add(&self, other: &Vector) -> Result<Vector, SketchError> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn scale(&self, k: f64) -> Vector {
        Self {
            components: self.components.iter().map(|c| c * k).collect(),
        }
    }

    /// Euclidean norm.
    pub fn mag(&self) -> f64 {
        self.components.iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    pub fn x(&self) -> Result<f64, SketchError> {
        self.component(0)
    }

    pub fn y(&self) -> Result<f64, SketchError> {
        self.component(1)
    }

    pub fn z(&self) -> Result<f64, SketchError> {
        self.component(2)
    }

    pub fn set_x(&mut self, value: f64) -> Result<(), SketchError> {
        self.set_component(0, value)
    }

    pub fn set_y(&mut self, value: f64) -> Result<(), SketchError> {
        self.set_component(1, value)
    }

    pub fn set_z(&mut self, value: f64) -> Result<(), SketchError> {
        self.set_component(2, value)
    }

    fn component(&self, index: usize) -> Result<f64, SketchError> {
        self.get(index).ok_or(SketchError::ComponentOutOfRange {
            index,
            dim: self.dim(),
        })
    }

    fn set_component(&mut self, index: usize, value: f64) -> Result<(), SketchError> {
        let dim = self.dim();
        let slot = self
            .components
            .get_mut(index)
            .ok_or(SketchError::ComponentOutOfRange { index, dim })?;
        *slot = value;
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Result<Vector, SketchError> {
        if self.dim() != other.dim() {
            return Err(SketchError::DimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(Self {
            components: self
                .components
                .iter()
                .zip(&other.components)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector{:?}", self.components.as_slice())
    }
}

//! Value casts and bit reinterpretation between species.
//!
//! [`cast`](Vector::cast) converts each lane's *value* and keeps the lane
//! count. [`reinterpret`](Vector::reinterpret) keeps the *bits* and lets the
//! lane count follow from the target species: the source register bytes are
//! read in native byte order, lane 0 first, then truncated or zero-extended
//! to the target's width.

use super::Vector;
use crate::element::Element;
use crate::error::Result;
use crate::register::Register;
use crate::shape::Shape;
use crate::species::Species;

impl<E: Element> Vector<E> {
    /// Converts every lane to `F` with Rust `as` semantics: integer
    /// narrowing wraps, float to integer saturates and maps NaN to zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lanevec::{Shape, Species, Vector};
    ///
    /// let ints = Vector::from_lanes(Species::<i32>::new(Shape::S128), &[1, -2, 70000, 4]).unwrap();
    /// let halves = ints.cast(Species::<i16>::new(Shape::S64)).unwrap();
    /// assert_eq!(halves.as_slice(), &[1, -2, 4464, 4]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneCountMismatch`](crate::LaneError::LaneCountMismatch)
    /// unless `species` has the same lane count.
    pub fn cast<F: Element>(self, species: Species<F>) -> Result<Vector<F>> {
        self.species.check_lane_count(species)?;
        let src = self.as_slice();
        Ok(Vector::from_fn(species, |i| F::from_scalar(src[i].to_scalar())))
    }

    /// Views the same bits as a vector of `species`.
    ///
    /// Wider lanes are the concatenation of narrower lanes in index order,
    /// in native byte order. A smaller target keeps the leading bytes; a
    /// larger one is zero-filled past the source.
    #[must_use]
    pub fn reinterpret<F: Element>(self, species: Species<F>) -> Vector<F> {
        let len = self.species.byte_size().min(species.byte_size());
        Vector::from_register(species, Register::from_prefix(self.reg.bytes(len)))
    }

    /// Moves the lanes into another shape of the same element kind,
    /// dropping trailing lanes or appending zero lanes.
    #[must_use]
    pub fn reshape(self, shape: Shape) -> Self {
        self.reinterpret(Species::new(shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;

    #[test]
    fn test_cast_int_float() {
        let i = Species::<i32>::new(Shape::S128);
        let f = Species::<f32>::new(Shape::S128);
        let v = Vector::from_lanes(i, &[-3, 0, 7, 1 << 20]).unwrap();
        let fv = v.cast(f).unwrap();
        assert_eq!(fv.as_slice(), &[-3.0, 0.0, 7.0, 1048576.0]);
        assert_eq!(fv.cast(i).unwrap(), v);
    }

    #[test]
    fn test_cast_narrowing_wraps() {
        let ints = Vector::from_lanes(Species::<i32>::new(Shape::S128), &[1, -2, 70000, 4]).unwrap();
        let halves = ints.cast(Species::<i16>::new(Shape::S64)).unwrap();
        assert_eq!(halves.as_slice(), &[1, -2, 4464, 4]);

        let wide = Vector::<i32>::broadcast(Species::new(Shape::S512), 300);
        let bytes = wide.cast(Species::<i8>::new(Shape::S128)).unwrap();
        assert!(bytes.as_slice().iter().all(|&b| b == 44));
    }

    #[test]
    fn test_cast_saturates_floats() {
        let f = Species::<f64>::new(Shape::S256);
        let i = Species::<i16>::new(Shape::S64);
        let v = Vector::from_lanes(f, &[1e9, -1e9, f64::NAN, -2.7]).unwrap();
        assert_eq!(v.cast(i).unwrap().as_slice(), &[i16::MAX, i16::MIN, 0, -2]);
    }

    #[test]
    fn test_cast_requires_lane_count() {
        let v = Vector::<i32>::iota(Species::new(Shape::S128));
        assert_eq!(
            v.cast(Species::<i32>::new(Shape::S256)),
            Err(LaneError::LaneCountMismatch {
                expected: 4,
                found: 8
            })
        );
    }

    #[test]
    fn test_reinterpret_bits() {
        let f = Species::<f32>::new(Shape::S128);
        let i = Species::<i32>::new(Shape::S128);
        let v = Vector::from_lanes(f, &[1.0, -0.0, 2.5, f32::INFINITY]).unwrap();
        let bits = v.reinterpret(i);
        let expected: Vec<i32> = v.as_slice().iter().map(|x| x.to_bits() as i32).collect();
        assert_eq!(bits.to_vec(), expected);
        assert_eq!(bits.reinterpret(f), v);
    }

    #[test]
    fn test_reinterpret_lane_concatenation() {
        let narrow = Species::<i16>::new(Shape::S64);
        let wide = Species::<i32>::new(Shape::S64);
        let v = Vector::from_lanes(narrow, &[1, 2, 3, 4]).unwrap();
        let w = v.reinterpret(wide);
        let lane0 = i32::from_ne_bytes({
            let mut b = [0u8; 4];
            b[..2].copy_from_slice(&1i16.to_ne_bytes());
            b[2..].copy_from_slice(&2i16.to_ne_bytes());
            b
        });
        assert_eq!(w.lane(0), Ok(lane0));
        assert_eq!(w.lane_count(), 2);
    }

    #[test]
    fn test_reinterpret_across_shapes() {
        let s128 = Species::<i32>::new(Shape::S128);
        let v = Vector::from_lanes(s128, &[1, 2, 3, 4]).unwrap();
        let down = v.reinterpret(Species::<i64>::new(Shape::S64));
        assert_eq!(down.lane_count(), 1);
        let up = down.reinterpret(s128);
        assert_eq!(up.as_slice(), &[1, 2, 0, 0]);
    }

    #[test]
    fn test_reshape() {
        let s8 = Species::<i8>::new(Shape::S64);
        let v = Vector::from_lanes(s8, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let wide = v.reshape(Shape::S128);
        assert_eq!(wide.lane_count(), 16);
        assert_eq!(&wide.as_slice()[..8], v.as_slice());
        assert!(wide.as_slice()[8..].iter().all(|&x| x == 0));
        assert_eq!(wide.reshape(Shape::S64), v);
    }
}

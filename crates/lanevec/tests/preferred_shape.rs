//! Configuring the preferred shape before first use.
//!
//! Runs in its own test binary: the preferred shape is fixed once per
//! process, so nothing else here may resolve it first.

use lanevec::{preferred_shape, set_preferred_shape, LaneError, Shape, Species};

#[test]
fn configured_shape_wins_and_then_freezes() {
    set_preferred_shape(Shape::S64).unwrap();
    assert_eq!(preferred_shape(), Shape::S64);

    assert_eq!(Species::<i8>::preferred().lane_count(), 8);
    assert_eq!(Species::<f64>::preferred().lane_count(), 1);
    assert_eq!(Species::<i32>::new(Shape::Preferred).shape(), Shape::S64);

    assert!(set_preferred_shape(Shape::S64).is_ok());
    assert!(set_preferred_shape(Shape::Preferred).is_ok());
    assert_eq!(
        set_preferred_shape(Shape::S512),
        Err(LaneError::PreferredShapeFixed {
            current: Shape::S64
        })
    );
}

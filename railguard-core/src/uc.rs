//! Unit constants for building quantities by multiplication, e.g. `120.0 * uc::T`

use crate::si;
use std::marker::PhantomData;

/// Metric tonne
pub const T: si::Mass = si::Mass {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0e3,
};
pub const M: si::Length = si::Length {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

use std::fmt::{Debug, Display};

/// A value that can sit in a matrix or vector entry.
pub trait Elem:
    Default +
    PartialEq +
    Eq +
    Clone +
    Send +
    Sync +
    Display +
    Debug +
    'static
{
    // "Z", "Q", "F₅", ...
    fn math_symbol() -> String;
}

//! Reading and writing of the native drawing and library formats.

pub mod fcd;

//! Camera Frame Layer
//!
//! The camera stack itself lives in the host application; this crate only
//! sees the frames it hands over. A frame arrives as an owned pixel buffer
//! with its sensor geometry and must be returned to the source exactly once.

pub mod frame;

pub use frame::FrameHandle;

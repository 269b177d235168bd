//! On-disk side of the logger.

mod file;

pub use file::{FileHandle, Provisioned, provision, rename_aside};

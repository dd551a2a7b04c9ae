//! On-disk persistence for toolset sidecars.

pub mod sidecar;

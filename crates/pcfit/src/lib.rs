#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use pcfit_3d as k3d;

#[doc(inline)]
pub use pcfit_icp as icp;

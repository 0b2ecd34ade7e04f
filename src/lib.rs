#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use da_cfg as cfg;
pub use da_mem as mem;
pub use da_vec as vec;

pub use da_vec::{DynArray, dyn_array};

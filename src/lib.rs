#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use replay_serde as serde;
pub use replay_utils as utils;

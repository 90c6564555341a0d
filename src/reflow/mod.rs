//! Block-based text reflow: noise filtering, normalization, page assembly.

mod noise;
mod normalize;
mod options;
mod page;

pub use noise::{NoiseFilter, DEFAULT_NOISE_PATTERNS};
pub use normalize::BlockNormalizer;
pub use options::ReflowOptions;
pub use page::PageAssembler;

pub mod apple_music;
pub mod artwork;
pub mod classify;
pub mod fetch;
pub mod payload;

pub use apple_music::{parse_track_link, AppleMusic};
pub use artwork::{build_image, DEFAULT_THUMBNAIL};
pub use classify::{classify, CATALOGUE_DOMAIN};
pub use fetch::Page;

pub mod convert;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod parse;
pub mod platform;
pub mod synthesis;

pub use convert::{Conversion, ConversionConfig, ConversionConfigBuilder, Converter, validate_url};
pub use error::{ArticastError, Result};
pub use extract::{Extraction, MIN_CONTENT_CHARS, Strategy, extract, extract_detailed};
pub use fetch::{DEFAULT_USER_AGENT, FetchConfig, fetch_article, fetch_file, fetch_stdin, fetch_url};
pub use parse::Document;
pub use platform::{PlatformMatcher, PlatformRule, match_platform, supported_platforms};
pub use synthesis::{
    DEFAULT_API_URL, PodcastAssets, SYNTHESIS_TIMEOUT, SynthesisClient, SynthesisConfig, SynthesisConfigBuilder,
};

//! Input sniffing and source description.

mod delimiter;
mod source;
mod trim;

pub use delimiter::{
    DELIMITERS, delimiter_format, describe_delimiter, detect_delimiter, parse_delimiter,
    read_sample_line,
};
pub use source::SourceMetadata;
pub(crate) use source::source_name;
pub(crate) use trim::LeadingSpaceTrim;

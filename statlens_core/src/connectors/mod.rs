// Platform clients. Each wraps one external collaborator behind a trait so the
// normalizers can be exercised without network access.
pub mod bilibili;
pub mod youtube;

pub use bilibili::{BilibiliApi, HttpBilibiliClient};
pub use youtube::{ExtractedInfo, MetadataExtractor, YtDlpExtractor};

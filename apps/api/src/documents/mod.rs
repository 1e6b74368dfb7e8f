// Document storage: multipart upload to S3 with a tracking row that records
// pending | stored | failed.

pub mod handlers;
pub mod store;

/**
 * Response Envelope Helpers
 *
 * Successful responses share the envelope
 * `{"success": true, "message": <text>, "data": <payload>}`.
 * List endpoints additionally carry pagination metadata.
 */

use serde::{Deserialize, Serialize};

/// Success response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload with the default message
    pub fn new(data: T) -> Self {
        Self::with_message(data, "Success")
    }

    /// Wrap a payload with an explicit message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Pagination metadata returned alongside list results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

impl PaginationMeta {
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        Self {
            total,
            page,
            limit,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// Convert (page, limit) into (skip, limit), clamping page to 1-based
pub fn paginate(page: usize, limit: usize) -> (usize, usize) {
    let page = page.max(1);
    let limit = limit.max(1);
    ((page - 1) * limit, limit)
}

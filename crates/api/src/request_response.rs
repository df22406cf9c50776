// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invocation request and response data transfer objects.

use roster::ImportSummary;

/// Status returned when the upload was processed.
pub const STATUS_OK: u16 = 200;

/// Status returned when the header was rejected and no row was processed.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Opaque per-invocation context supplied by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// Transport-assigned request id, used only as a log field.
    pub request_id: Option<String>,
}

impl InvocationContext {
    /// Creates a context carrying a request id.
    #[must_use]
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }

    /// Returns the request id, or `-` when none was supplied.
    #[must_use]
    pub fn request_id_or_default(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }
}

/// The invocation result: a status code and the import summary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// `200` when rows were processed, `400` when the header was rejected.
    pub status_code: u16,
    /// Counts and error strings.
    pub body: ImportSummary,
}

impl UploadResponse {
    /// A processed upload.
    #[must_use]
    pub const fn ok(body: ImportSummary) -> Self {
        Self {
            status_code: STATUS_OK,
            body,
        }
    }

    /// A rejected header.
    #[must_use]
    pub const fn bad_request(body: ImportSummary) -> Self {
        Self {
            status_code: STATUS_BAD_REQUEST,
            body,
        }
    }

    /// Returns true if the upload was processed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;

/// Out-of-band upload failures.
///
/// In-band problems (bad headers, bad rows, bad fields) are reported in the
/// response body instead. Only a failing store aborts an upload.
#[derive(Debug, Error)]
pub enum UploadError<E>
where
    E: std::error::Error + 'static,
{
    /// The store failed; rows before the failure stay committed.
    #[error("Store failure: {0}")]
    Store(#[source] E),
}

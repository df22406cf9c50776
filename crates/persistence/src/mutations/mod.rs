// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Upserts are written as select-then-update-or-insert inside a transaction,
//! which reads the same on every backend.

pub mod chains;
pub mod users;

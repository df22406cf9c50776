// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function is generated in backend-specific monomorphic versions by
//! `backend_fn!`: `_sqlite` always, `_mysql` with the `mysql` feature. The
//! `Persistence` adapter in `lib.rs` picks one per call.

pub mod chains;
pub mod users;

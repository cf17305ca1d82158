// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Only used to read existing commit messages for range validation; the
//! commit-msg hook path never touches the repository.

mod repo;

pub use repo::Repository;

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message decomposition.

mod message;

pub use message::CommitMessage;

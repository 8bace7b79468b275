// SPDX-License-Identifier: Apache-2.0

pub(crate) mod me;
pub(crate) mod meta;
pub(crate) mod regions;
pub(crate) mod reports;
pub(crate) mod social;
pub(crate) mod support;
pub(crate) mod walks;

// SPDX-License-Identifier: GPL-3.0-only

pub mod partitioning;

pub use partitioning::PartitioningBackend;

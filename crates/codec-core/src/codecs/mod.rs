//! Native codec implementations

pub mod g722;

//! Static seed data
//!
//! All entities start life here; the feed only ever perturbs what these
//! builders return. Discarded on process exit, never persisted.

mod economic;
mod feasibility;

pub use economic::seed_data as economic_seed;
pub use feasibility::seed_projects;

//! Persistence of the per-generation record stream.
//!
//! The recorder observes [`GenerationReport`](crate::schema::GenerationReport)s
//! and writes them as plain text, one value per line:
//!
//! ```text
//! Initial Fitness:
//! 0.43
//! ...
//! Fitness Generation[1]:
//! Fittest Phenotype: FFRFLS
//! 0.71
//! ...
//! Final Fitness Generation[57]:
//! Fittest Phenotype: FFFFLFFFFFRFFFLFFFFRFFLFS
//! 1
//! ...
//! ```
//!
//! Section numbers are engine generations: the initial population is
//! generation 0, so the first evolved section is `Fitness Generation[1]`.
//!
//! The solution file holds only the fittest phenotype.

mod recorder;

pub use recorder::{RecorderStats, RunRecorder, write_solution};

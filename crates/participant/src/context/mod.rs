//! Reference resolution and prompt assembly.
//!
//! | Step | Module | Output |
//! |------|--------|--------|
//! | 1. Resolve each reference | `resolver` | text + location, or a skip reason |
//! | 2. Splice into the prompt | `assembler` | final prompt + citations |

pub mod assembler;
pub mod resolver;

pub use assembler::{PromptAssembler, PromptAssembly};
pub use resolver::{ReferenceResolver, Resolution, Unresolvable};

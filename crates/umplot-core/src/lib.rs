//! Umplot Core Types and Definitions
//!
//! This crate provides the side-effect-light building blocks of the umplot
//! generation pipeline. It includes:
//!
//! - **Diagram types**: Logical diagram kinds and their generator flags ([`diagram::DiagramType`])
//! - **Artifacts**: Naming and discovery of compiler output files ([`artifact`] module)
//! - **Output modes**: Exact-file versus folder placement ([`output::OutputMode`])
//! - **Naming**: Timestamped, sanitized folder names ([`naming`] module)

pub mod artifact;
pub mod diagram;
pub mod naming;
pub mod output;

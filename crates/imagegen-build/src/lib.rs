//! Dockerfile composition for imagegen.
//!
//! # Release directory layout
//!
//! ```text
//! <release>/
//!   public.json                     variant manifest
//!   base/<fragment>.Dockerfile      base fragments
//!   base/templates/intellij.Dockerfile.j2
//!   base/templates/thirdparty.Dockerfile.j2
//!   <variant>/Dockerfile            generated output
//! ```
//!
//! # Pipeline
//!
//! ```text
//! imagegen generate <release>
//!   1. Manifest   ── public.json → VariantManifest
//!   2. Templates  ── base/templates/*.j2 (fatal if missing)
//!   3. Resolve    ── FragmentResolver inlines `FROM <fragment>` recursively
//!   4. Trailer    ── TrailerTemplates::render()
//!   5. Write      ── <release>/<variant>/Dockerfile
//! ```
//!
//! A line `FROM <identifier>` where the identifier is only letters and
//! hyphens is an inclusion directive. If `base/<identifier>.Dockerfile`
//! exists the line is replaced by that fragment's resolved content;
//! otherwise it is kept as a regular `FROM` instruction.

pub mod directive;
pub mod dockerfile;
pub mod generate;
pub mod resolve;
pub mod template;
pub mod write;

pub use dockerfile::{ComposeError, DISCLAIMER, DockerfileGenerator};
pub use generate::{GenerateError, GenerateOptions, GenerateReport, generate};
pub use resolve::{FragmentResolver, ResolveError};
pub use template::{TemplateError, TrailerTemplates, TrailerVars};
pub use write::{WriteError, write_variant};

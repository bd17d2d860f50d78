//! Project Metadata
//!
//! Resolves name, version, author and copyright for a Python project and
//! writes them into a documentation configuration namespace.
//!
//! ```rust,ignore
//! use sphinx_me::metadata::{ConfigNamespace, Interactive, MetadataResolver, setup_conf};
//!
//! let resolver = MetadataResolver::new(Default::default())?;
//! let mut namespace = ConfigNamespace::new();
//! setup_conf(&mut namespace, Path::new("docs/conf.py"), &resolver, &Interactive)?;
//! ```

pub mod authors;
pub mod fallback;
pub mod namespace;
pub mod project;
pub mod resolver;
pub mod types;
pub mod version;

pub use fallback::{Deny, Fallback, Interactive, Preset};
pub use namespace::{ConfigNamespace, MANAGED_KEYS};
pub use project::ProjectContext;
pub use resolver::{MetadataResolver, ResolverOptions, setup_conf};
pub use types::{MetadataSource, ProjectMetadata, ScanOutcome, Sourced};
pub use version::{VersionAccessor, VersionExtractor, extract_version};

//! Post-processing passes for backadmin backend configuration trees.
//!
//! A backend configuration declares admin panels for persisted objects
//! ("entities" for the relational ORM, "documents" for the object
//! mapper). Before the framework renders admin screens, the declared
//! tree goes through two passes:
//!
//! - [`short_types`] — rewrites short form-type names (built-in and
//!   application-supplied aliases, plus legacy v1 tokens) into
//!   fully-qualified form-type identifiers at the four field-bearing
//!   config paths.
//! - [`list_filters`] — normalizes list-view `form_filters` declarations
//!   into a property-keyed mapping and guesses widget types from ORM
//!   metadata for entity properties without an explicit type.
//!
//! Passes implement [`pass::ConfigPass`] and are pure transforms: they
//! consume a [`config_tree_core::ConfigValue`] tree and return the
//! transformed tree, failing fast with a [`error::ConfigError`] on
//! invalid declarations.
//!
//! The ORM and the application's static choice callbacks are reached
//! through the narrow [`metadata::MetadataRegistry`] and
//! [`choices::ChoiceSource`] interfaces, with TOML-file-backed
//! implementations so the CLI and tests run without a live framework.
//!
//! # Example
//!
//! ```ignore
//! use backadmin_config::list_filters::ListFilterGuesser;
//! use backadmin_config::pass::apply_passes;
//! use backadmin_config::short_types::ShortTypeResolver;
//! use config_tree_core::parse_file;
//!
//! let config = parse_file("backend.yaml".as_ref())?;
//! let guesser = ListFilterGuesser::new(&metadata, &choices);
//! let resolver = ShortTypeResolver::new();
//! let processed = apply_passes(&[&guesser, &resolver], config)?;
//! ```

pub mod backend;
pub mod check;
pub mod choices;
pub mod error;
pub mod inspect;
pub mod list_filters;
pub mod metadata;
pub mod pass;
pub mod report;
pub mod short_types;
pub mod types;

//! obfmap: render obfuscation rename maps
//!
//! A [`domain::Report`] records what an obfuscation run did to every type,
//! member, resource and hidden string. The [`render`] module writes it as a
//! text, XML or JSON map through the [`render::MapWriter`] trait.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod render;

pub use domain::{ClassEntry, MemberEntry, MethodKey, Report, Status, TypedKey};
pub use error::{RenderError, Result};
pub use render::{map_writer, render_map, MapFormat, MapWriter};

//! Lux Core - scene description for the Lux path tracer.
//!
//! This crate provides:
//!
//! - **Material**: the surface description carried by every primitive
//! - **OBJ loading**: `load_obj` / `parse_obj` turn Wavefront OBJ text
//!   into renderer-agnostic triangle geometry
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{load_obj, Material};
//!
//! let geometry = load_obj("suzanne.obj")?;
//! println!("Loaded {} triangles", geometry.triangle_count());
//! ```

pub mod material;
pub mod obj;

// Re-export commonly used types
pub use material::Material;
pub use obj::{load_obj, parse_obj, ObjError, ObjGeometry, ObjTriangle};

//! Top-level facade crate for solaris-exporter.
//!
//! Re-exports the exposition core and the server library so users can depend on a single crate.

pub mod core {
    pub use solaris_exporter_core::*;
}

pub mod server {
    pub use solaris_exporter_server::*;
}

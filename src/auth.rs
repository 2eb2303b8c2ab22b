//! Auth-domain identifiers, service-principal credentials, and identity token models.

pub mod id;
pub mod principal;
pub mod secret;
pub mod token;

pub use id::*;
pub use principal::*;
pub use secret::*;
pub use token::*;

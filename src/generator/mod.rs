//! Script generators, one per request mode.
//!
//! Every generator validates its whole request before the first command is
//! emitted and returns either the complete script or an error, never a
//! partial script.

pub mod mode1;
pub mod mode2;
pub mod mode3;

use crate::error::Result;
use crate::request::Request;
use crate::script::Script;

/// Run the generator matching the request's mode.
pub fn generate(request: &Request) -> Result<Script> {
    match request {
        Request::Nodes(r) => mode1::generate(r),
        Request::Plt(r) => mode2::generate(r),
        Request::Sets(r) => mode3::generate(r),
    }
}

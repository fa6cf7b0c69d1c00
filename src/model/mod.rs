//! Mirrors of the records the booking backend returns. The portal does not
//! own their lifecycle; it only reads, validates forms and forwards.

pub mod armada;
pub mod booking;
pub mod common;
pub mod fasilitas;
pub mod paket;
pub mod report;
pub mod supir;
pub mod user;

pub use common::{Envelope, ListParams, Meta, Page};

//! Derived read-only quantities
//!
//! Stateless read-outs composed from conversion formulas: altitude, speed,
//! position, heading and the airframe attitude/identity. Each accessor
//! reads fresh offsets on every call and returns a `Result`; callers that
//! only need the value as log-message context decide how to fall back.

pub mod airframe;
pub mod altitude;
pub mod heading;
pub mod position;
pub mod speed;

pub use airframe::Airframe;
pub use altitude::Altitude;
pub use heading::Heading;
pub use position::Position;
pub use speed::Speed;

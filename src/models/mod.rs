pub mod audit;
pub mod elevation;
pub mod invite;
pub mod outbox;
pub mod permission;
pub mod student;
pub mod user;

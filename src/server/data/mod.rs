//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations. They are generic over
//! [`sea_orm::ConnectionTrait`] so the battle clustering pass can run every query inside the
//! single transaction that also holds its advisory lock.

pub mod battle;
pub mod lock;

//! `SeaORM` entity definitions.

pub mod accounts;
pub mod appointments;
pub mod articles;
pub mod sea_orm_active_enums;
pub mod sessions;

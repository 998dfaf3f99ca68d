//! 테이블 저장소.

pub mod csv;

//! Admin Registry
//!
//! 모듈별 관리자 레코드. 같은 identity라도 모듈마다 별도 레코드를 가지며,
//! 전역 조회(`get_admin`)는 마운트 순서상 첫 모듈의 레코드를 돌려준다.

mod record;
mod registry;

pub use record::Admin;
pub use registry::{AdminRegistry, ModuleAdmins};

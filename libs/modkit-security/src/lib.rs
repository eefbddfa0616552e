#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod context;
pub mod posture;

pub use context::{
    ContextResolver, ExecutionContext, ExecutionContextBuilder, MembershipId, RoleId, TenantId,
};
pub use posture::AccessPosture;

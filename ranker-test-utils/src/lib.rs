pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod redis;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_ADMIN_SECRET, TEST_STAGE},
        fixtures::firm::factory,
        TestBuilder, TestContext, TestError,
    };
}

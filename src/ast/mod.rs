pub mod operators;
pub mod path;
pub mod query;

pub use self::operators::{Action, Connective, Direction, Operator, ProjectionKind};
pub use self::path::PropertyPath;
pub(crate) use self::path::PathBuilder;
pub use self::query::{Condition, CriteriaItem, OrderItem, Projection, QueryDescriptor};

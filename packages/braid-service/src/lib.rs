pub mod aggregate;
pub mod bounds;
pub mod date_serde;
pub mod executor;
pub mod more;
pub mod request;
pub mod score;

mod error;

pub use error::{Error, Result};

pub use aggregate::{AggregateStrategy, TimeAggregate};
pub use bounds::{BoundsStrategy, TimeBounds};
pub use executor::{Strategies, TaskExecutor};
pub use more::MoreMessages;
pub use request::{Direction, MoreRequest, RequestWindow, SearchRequest};
pub use score::{MessageScore, ScoreStrategy};

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

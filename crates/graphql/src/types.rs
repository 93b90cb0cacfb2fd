//! GraphQL type definitions.

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::schema::Query;

/// The Atrium GraphQL schema type.
pub type AtriumSchema = Schema<Query, EmptyMutation, EmptySubscription>;

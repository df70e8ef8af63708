//! Promotions
//!
//! Each promotion kind owns its rule type and the resolver step that applies it to an
//! [`Order`](crate::order::Order). Resolvers run freebies first, then group-buys, then
//! multi-buys.

use std::fmt;

pub mod applications;
pub mod freebie;
pub mod group_buy;
pub mod multi_buy;

pub mod prelude;

/// Promotion kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    /// Buy N for a flat price
    MultiBuy,

    /// Buy N, get M free
    Freebie,

    /// Any N from a set for a flat price
    GroupBuy,
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromotionKind::MultiBuy => "multi-buy",
            PromotionKind::Freebie => "freebie",
            PromotionKind::GroupBuy => "group-buy",
        })
    }
}

//! Promotions prelude

pub use super::{
    PromotionKind, applications::PromotionApplication, freebie::Freebie, group_buy::GroupBuy,
    multi_buy::MultiBuy,
};
